//! CSV bulk import, corpus export, and template export
//!
//! Column contract (quoted-field escaping per RFC 4180, handled by `csv`):
//! Project Id, Object Id (optional), Test Case Id, Description, Category,
//! Test Steps (`;`-delimited), Expected Results, Parameters (optional),
//! Outcome.
//!
//! Malformed rows are skipped with a per-row reason; a bad row never aborts
//! the batch.

use crate::error::CorpusError;
use crosswalk_types::{CaseId, Category, ObjectId, Outcome, Project, TestCase};
use std::str::FromStr;

/// Import/export column headers, in order
pub const HEADERS: [&str; 9] = [
    "Project Id",
    "Object Id",
    "Test Case Id",
    "Description",
    "Category",
    "Test Steps",
    "Expected Results",
    "Parameters",
    "Outcome",
];

/// Delimiter between steps inside the Test Steps column
const STEP_DELIMITER: char = ';';

/// One skipped import row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the input (header is line 1)
    pub line: usize,
    /// Why the row was skipped
    pub reason: String,
}

/// Result of one bulk import
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Ids of the cases created, in input order
    pub created: Vec<CaseId>,
    /// Rows skipped, with reasons
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    /// Number of cases created
    #[inline]
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    /// Number of rows skipped
    #[inline]
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// A parsed row, before insertion
struct ParsedRow {
    object_id: Option<ObjectId>,
    case_key: String,
    description: String,
    category: Category,
    steps: Vec<String>,
    expected_results: String,
    parameters: Option<String>,
    outcome: Outcome,
}

fn field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn parse_row(
    project: &Project,
    headers: &csv::StringRecord,
    record: &csv::StringRecord,
) -> Result<ParsedRow, String> {
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let project_id = field(record, col("Project Id"));
    if !project_id.is_empty() && project_id != project.id.to_string() {
        return Err(format!("row belongs to project {project_id}"));
    }

    let case_key = field(record, col("Test Case Id"));
    if case_key.is_empty() {
        return Err("missing required field: Test Case Id".to_string());
    }
    if project.has_case_key(case_key) {
        return Err(format!("duplicate test case key: {case_key}"));
    }

    let description = field(record, col("Description"));
    if description.is_empty() {
        return Err("missing required field: Description".to_string());
    }

    let category = Category::from_str(field(record, col("Category")))
        .map_err(|e| e.to_string())?;

    let steps: Vec<String> = field(record, col("Test Steps"))
        .split(STEP_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if steps.is_empty() {
        return Err("missing required field: Test Steps".to_string());
    }

    let expected_results = field(record, col("Expected Results"));
    if expected_results.is_empty() {
        return Err("missing required field: Expected Results".to_string());
    }

    let object_field = field(record, col("Object Id"));
    let object_id = if object_field.is_empty() {
        None
    } else {
        let id = ObjectId::from_str(object_field)
            .map_err(|_| format!("unparseable object id: {object_field}"))?;
        if project.object(id).is_none() {
            return Err(format!("unknown object id: {object_field}"));
        }
        Some(id)
    };

    let outcome =
        Outcome::from_str(field(record, col("Outcome"))).map_err(|e| e.to_string())?;

    let parameters_field = field(record, col("Parameters"));
    let parameters = if parameters_field.is_empty() {
        None
    } else {
        Some(parameters_field.to_string())
    };

    Ok(ParsedRow {
        object_id,
        case_key: case_key.to_string(),
        description: description.to_string(),
        category,
        steps,
        expected_results: expected_results.to_string(),
        parameters,
        outcome,
    })
}

/// Bulk-import test cases from CSV text.
///
/// Each well-formed row becomes one test case; malformed rows (missing
/// required field, unknown category/outcome/object, duplicate key, foreign
/// project id) are collected in the report with their line number.
pub fn import_cases(project: &mut Project, csv_text: &str) -> Result<ImportReport, CorpusError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut report = ImportReport::default();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2; // header occupies line 1
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.skipped.push(SkippedRow {
                    line,
                    reason: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        match parse_row(project, &headers, &record) {
            Ok(row) => {
                let mut case = TestCase::new(
                    project.id,
                    row.case_key,
                    row.description,
                    row.category,
                    row.steps,
                    row.expected_results,
                );
                case.object_id = row.object_id;
                case.parameters = row.parameters;
                case.outcome = row.outcome;

                report.created.push(case.id);
                project.test_cases.push(case);
            }
            Err(reason) => {
                tracing::warn!(line, %reason, "import row skipped");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    tracing::info!(
        project_id = %project.id,
        created = report.created_count(),
        skipped = report.skipped_count(),
        "bulk import complete"
    );
    Ok(report)
}

fn write_case(
    writer: &mut csv::Writer<Vec<u8>>,
    case: &TestCase,
) -> Result<(), CorpusError> {
    writer.write_record([
        case.project_id.to_string().as_str(),
        case.object_id.map(|o| o.to_string()).unwrap_or_default().as_str(),
        case.case_key.as_str(),
        case.description.as_str(),
        case.category.as_str(),
        case.steps.join("; ").as_str(),
        case.expected_results.as_str(),
        case.parameters.as_deref().unwrap_or(""),
        case.outcome.as_str(),
    ])?;
    Ok(())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, CorpusError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| CorpusError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CorpusError::Export(e.to_string()))
}

/// Export the project's corpus in the import column format.
///
/// The output round-trips through [`import_cases`] into an empty project.
pub fn export_cases(project: &Project) -> Result<String, CorpusError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for case in &project.test_cases {
        write_case(&mut writer, case)?;
    }
    finish(writer)
}

/// Produce an import template: the header plus one example row
pub fn export_template() -> Result<String, CorpusError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    writer.write_record([
        "",
        "",
        "EXAMPLE-Functional-001",
        "Describe what the case certifies",
        "Functional",
        "execute; verify behavior; validate results",
        "Converted output matches original output",
        "key=value",
        "Not Executed",
    ])?;
    finish(writer)
}
