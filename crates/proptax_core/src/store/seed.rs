//! Seed datasets for the in-memory store.
//!
//! # Responsibility
//! - Provide the built-in demo dataset.
//! - Parse header-keyed CSV exports of municipalities and properties.
//!
//! # Invariants
//! - Columns are located by header name, never by position.
//! - Parse failures name the file, line and column that failed.

use crate::model::municipality::Municipality;
use crate::model::property::Property;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MUNICIPALITIES_FILE_NAME: &str = "municipalities.csv";
pub const PROPERTIES_FILE_NAME: &str = "properties.csv";

const MUNICIPALITY_ID_COLUMN: &str = "munid";
const MUNICIPALITY_NAME_COLUMN: &str = "name_municipal_w_type";
const MUNICIPAL_RATE_COLUMN: &str = "municipal_rate";
const EDUCATION_RATE_COLUMN: &str = "education_rate";
const ROLL_NUMBER_COLUMN: &str = "assessment_roll_number";
const ASSESSMENT_VALUE_COLUMN: &str = "assessment_value";
const PROPERTY_MUNICIPALITY_COLUMN: &str = "municipal_id";

/// Records used to seed a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedData {
    pub municipalities: Vec<Municipality>,
    pub properties: Vec<Property>,
}

#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingHeader {
        file: &'static str,
    },
    MissingColumn {
        file: &'static str,
        column: &'static str,
    },
    MalformedRow {
        file: &'static str,
        line: usize,
        message: String,
    },
    InvalidDecimal {
        file: &'static str,
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::MissingHeader { file } => write!(f, "{file}: missing header row"),
            Self::MissingColumn { file, column } => {
                write!(f, "{file}: missing required column `{column}`")
            }
            Self::MalformedRow {
                file,
                line,
                message,
            } => write!(f, "{file}:{line}: {message}"),
            Self::InvalidDecimal {
                file,
                line,
                column,
                value,
            } => write!(f, "{file}:{line}: invalid decimal `{value}` in column `{column}`"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SeedData {
    /// Built-in demo dataset: five municipalities and twelve properties.
    pub fn demo() -> Self {
        let municipalities = [
            ("M001", "Springfield", 125, 75),
            ("M002", "Shelbyville", 135, 80),
            ("M003", "Capital City", 150, 85),
            ("M004", "Cypress Creek", 115, 70),
            ("M005", "North Haverbrook", 140, 75),
        ]
        .into_iter()
        .map(|(id, name, municipal, education)| Municipality {
            municipality_id: id.to_string(),
            name: name.to_string(),
            municipal_rate: Decimal::new(municipal, 2),
            education_rate: Decimal::new(education, 2),
        })
        .collect();

        let properties = [
            ("P001", 250_000, "M001"),
            ("P002", 320_000, "M001"),
            ("P003", 450_000, "M002"),
            ("P004", 380_000, "M002"),
            ("P005", 520_000, "M003"),
            ("P006", 290_000, "M003"),
            ("P007", 410_000, "M004"),
            ("P008", 350_000, "M004"),
            ("P009", 480_000, "M005"),
            ("P010", 275_000, "M005"),
            ("P011", 390_000, "M001"),
            ("P012", 425_000, "M002"),
        ]
        .into_iter()
        .map(|(roll, value, municipality)| Property {
            roll_number: roll.to_string(),
            assessment_value: Decimal::from(value),
            municipality_id: municipality.to_string(),
        })
        .collect();

        Self {
            municipalities,
            properties,
        }
    }

    /// Parses municipality and property CSV documents.
    pub fn from_csv(municipalities_csv: &str, properties_csv: &str) -> Result<Self, SeedError> {
        Ok(Self {
            municipalities: parse_municipalities(municipalities_csv)?,
            properties: parse_properties(properties_csv)?,
        })
    }

    /// Reads `municipalities.csv` and `properties.csv` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SeedError> {
        let dir = dir.as_ref();
        let municipalities = read_file(&dir.join(MUNICIPALITIES_FILE_NAME))?;
        let properties = read_file(&dir.join(PROPERTIES_FILE_NAME))?;
        Self::from_csv(&municipalities, &properties)
    }
}

fn read_file(path: &Path) -> Result<String, SeedError> {
    std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_municipalities(text: &str) -> Result<Vec<Municipality>, SeedError> {
    let table = CsvTable::parse(MUNICIPALITIES_FILE_NAME, text)?;
    let id = table.column(MUNICIPALITY_ID_COLUMN)?;
    let name = table.column(MUNICIPALITY_NAME_COLUMN)?;
    let municipal = table.column(MUNICIPAL_RATE_COLUMN)?;
    let education = table.column(EDUCATION_RATE_COLUMN)?;

    table
        .rows
        .iter()
        .map(|row| -> Result<Municipality, SeedError> {
            Ok(Municipality {
                municipality_id: row.get(id).to_string(),
                name: row.get(name).to_string(),
                municipal_rate: table.decimal(row, municipal, MUNICIPAL_RATE_COLUMN)?,
                education_rate: table.decimal(row, education, EDUCATION_RATE_COLUMN)?,
            })
        })
        .collect()
}

fn parse_properties(text: &str) -> Result<Vec<Property>, SeedError> {
    let table = CsvTable::parse(PROPERTIES_FILE_NAME, text)?;
    let roll = table.column(ROLL_NUMBER_COLUMN)?;
    let value = table.column(ASSESSMENT_VALUE_COLUMN)?;
    let municipality = table.column(PROPERTY_MUNICIPALITY_COLUMN)?;

    table
        .rows
        .iter()
        .map(|row| -> Result<Property, SeedError> {
            Ok(Property {
                roll_number: row.get(roll).to_string(),
                assessment_value: table.decimal(row, value, ASSESSMENT_VALUE_COLUMN)?,
                municipality_id: row.get(municipality).to_string(),
            })
        })
        .collect()
}

struct CsvRow {
    line: usize,
    fields: Vec<String>,
}

impl CsvRow {
    fn get(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }
}

struct CsvTable {
    file: &'static str,
    header: HashMap<String, usize>,
    rows: Vec<CsvRow>,
}

impl CsvTable {
    fn parse(file: &'static str, text: &str) -> Result<Self, SeedError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_start_matches('\u{feff}')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header_text) = lines.next().ok_or(SeedError::MissingHeader { file })?;
        let header_fields = split_record(header_text).map_err(|message| {
            SeedError::MalformedRow {
                file,
                line: header_line,
                message,
            }
        })?;
        let width = header_fields.len();
        let header = header_fields
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name, index))
            .collect::<HashMap<_, _>>();

        let mut rows = Vec::new();
        for (line, record) in lines {
            let fields =
                split_record(record).map_err(|message| SeedError::MalformedRow {
                    file,
                    line,
                    message,
                })?;
            if fields.len() != width {
                return Err(SeedError::MalformedRow {
                    file,
                    line,
                    message: format!("expected {width} fields, found {}", fields.len()),
                });
            }
            rows.push(CsvRow { line, fields });
        }

        Ok(Self { file, header, rows })
    }

    fn column(&self, name: &'static str) -> Result<usize, SeedError> {
        self.header
            .get(name)
            .copied()
            .ok_or(SeedError::MissingColumn {
                file: self.file,
                column: name,
            })
    }

    fn decimal(
        &self,
        row: &CsvRow,
        index: usize,
        column: &'static str,
    ) -> Result<Decimal, SeedError> {
        let raw = row.get(index);
        Decimal::from_str(raw).map_err(|_| SeedError::InvalidDecimal {
            file: self.file,
            line: row.line,
            column,
            value: raw.to_string(),
        })
    }
}

/// Splits one CSV record, honouring double-quoted fields and `""` escapes.
///
/// Unquoted fields are trimmed; quoted fields keep their inner whitespace.
fn split_record(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if !quoted && current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
                quoted = true;
            }
            ',' if !in_quotes => {
                fields.push(finish_field(&mut current, quoted));
                quoted = false;
            }
            // Whitespace between a closing quote and the delimiter.
            other if quoted && !in_quotes && other.is_whitespace() => {}
            other => current.push(other),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(finish_field(&mut current, quoted));
    Ok(fields)
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = std::mem::take(current);
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{split_record, SeedData, SeedError};
    use rust_decimal::Decimal;

    const MUNICIPALITIES: &str = "munid,name_municipal_w_type,municipal_rate,education_rate\n\
        M001,Springfield,1.25,0.75\n\
        M002,\"Shelbyville, Town of\",1.35,0.80\n";
    const PROPERTIES: &str = "municipal_id,assessment_roll_number,assessment_value\n\
        M001,P001,250000\n\
        \n\
        M002,P002,320000.50\n";

    #[test]
    fn demo_dataset_has_expected_shape() {
        let demo = SeedData::demo();
        assert_eq!(demo.municipalities.len(), 5);
        assert_eq!(demo.properties.len(), 12);
        assert_eq!(demo.municipalities[0].total_rate(), Decimal::from(2));
    }

    #[test]
    fn csv_columns_are_located_by_header() {
        let seed = SeedData::from_csv(MUNICIPALITIES, PROPERTIES).unwrap();
        assert_eq!(seed.municipalities.len(), 2);
        assert_eq!(seed.municipalities[1].name, "Shelbyville, Town of");
        assert_eq!(seed.properties.len(), 2);
        assert_eq!(seed.properties[0].roll_number, "P001");
        assert_eq!(seed.properties[1].municipality_id, "M002");
        assert_eq!(seed.properties[1].assessment_value, Decimal::new(32_000_050, 2));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = SeedData::from_csv(MUNICIPALITIES, "assessment_roll_number,assessment_value\n")
            .unwrap_err();
        assert!(matches!(
            err,
            SeedError::MissingColumn {
                file: "properties.csv",
                column: "municipal_id"
            }
        ));
    }

    #[test]
    fn invalid_decimal_names_line_and_column() {
        let properties = "assessment_roll_number,assessment_value,municipal_id\nP001,lots,M001\n";
        let err = SeedData::from_csv(MUNICIPALITIES, properties).unwrap_err();
        match err {
            SeedError::InvalidDecimal { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, "assessment_value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_malformed() {
        let properties = "assessment_roll_number,assessment_value,municipal_id\nP001,5\n";
        let err = SeedData::from_csv(MUNICIPALITIES, properties).unwrap_err();
        assert!(matches!(err, SeedError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn split_record_handles_quotes_and_escapes() {
        assert_eq!(
            split_record(r#"a, "b, c" ,"say ""hi""""#).unwrap(),
            vec!["a", "b, c", r#"say "hi""#]
        );
        assert!(split_record("\"open").is_err());
    }

    #[test]
    fn quoted_fields_keep_inner_whitespace() {
        assert_eq!(
            split_record(r#"  M009 ,"  Padded  " , 1.10"#).unwrap(),
            vec!["M009", "  Padded  ", "1.10"]
        );

        let municipalities = "munid,name_municipal_w_type,municipal_rate,education_rate\n\
            M009,\"  Padded  \",1.10,0.65\n";
        let properties = "assessment_roll_number,assessment_value,municipal_id\n";
        let seed = SeedData::from_csv(municipalities, properties).unwrap();
        assert_eq!(seed.municipalities[0].name, "  Padded  ");
    }
}
