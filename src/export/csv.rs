//! CSV export implementation.
//!
//! Exports one row per project in CSV format for spreadsheet use.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "root,name,display_name,type,lines,files,bytes,dependencies,ignored"
        )?;

        for project in &data.projects {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{}",
                Self::escape_field(&project.root),
                Self::escape_field(&project.name),
                Self::escape_field(&project.display_name),
                project.project_type.label(),
                project.size.lines,
                project.size.files,
                project.size.bytes,
                project.dependency_count,
                project.ignored
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_projects;
    use crate::graph::{FilterType, Projects};

    #[test]
    fn test_csv_export_basic() {
        let projects = sample_projects();
        let data = ExportData::new(&projects, FilterType::All, false);
        let mut output = Vec::new();

        CsvExporter.export(&data, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();

        // Header + 4 projects
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "root,name,display_name,type,lines,files,bytes,dependencies,ignored"
        );
        assert_eq!(lines[1], "/repo,:app,:app,code,100,4,2048,2,false");
        assert_eq!(lines[3], "shop,orders,orders,database,0,0,0,0,false");
        assert!(lines[4].contains(",external,"));
    }

    #[test]
    fn test_csv_export_ignored_flag() {
        let mut projects = sample_projects();
        let app = projects.find("/repo", ":app").unwrap();
        projects[app].set_config("ignore", "true");

        let data = ExportData::new(&projects, FilterType::ExcludeExternal, false);
        let mut output = Vec::new();
        CsvExporter.export(&data, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_str.lines().collect();
        assert!(lines[1].ends_with(",1,true"));
    }

    #[test]
    fn test_csv_escape_field() {
        // No escaping needed
        assert_eq!(CsvExporter::escape_field("simple"), "simple");

        // Contains comma
        assert_eq!(
            CsvExporter::escape_field("has,comma"),
            "\"has,comma\""
        );

        // Contains quotes
        assert_eq!(
            CsvExporter::escape_field("has\"quote"),
            "\"has\"\"quote\""
        );

        // Contains newline
        assert_eq!(
            CsvExporter::escape_field("has\nnewline"),
            "\"has\nnewline\""
        );
    }

    #[test]
    fn test_csv_export_special_characters() {
        let mut projects = Projects::new();
        projects.get("C:\\repos\\a,b", ":app").unwrap();

        let data = ExportData::new(&projects, FilterType::All, false);
        let mut output = Vec::new();
        CsvExporter.export(&data, &mut output).unwrap();

        let csv_str = String::from_utf8(output).unwrap();

        // Root with comma should be quoted
        assert!(csv_str.contains("\"C:\\repos\\a,b\""));
    }
}
