//! Offline CSV conversion: one query per row, no guide requests.

use crate::core::age::{convert, round_for_display};
use crate::core::form::parse_form;
use crate::core::profiles::profile;
use crate::domain::model::FormInput;
use crate::utils::error::{PetAgeError, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct BatchRow {
    species: String,
    #[serde(default)]
    breed: Option<String>,
    #[serde(default)]
    age: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutputRow {
    species: String,
    breed: String,
    age: String,
    human_age: Option<String>,
    size_class: Option<&'static str>,
    lifespan: Option<&'static str>,
    error: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted + self.rejected
    }
}

const OUTPUT_HEADERS: [&str; 7] = [
    "species",
    "breed",
    "age",
    "human_age",
    "size_class",
    "lifespan",
    "error",
];

/// 讀取 `species,breed,age` 欄位；無效列照樣輸出並附上錯誤訊息，整批不中斷
pub fn convert_csv<R: Read, W: Write>(input: R, output: W, decimals: usize) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    // 標題列自行寫出，只有標題的輸入也會得到完整的輸出標題
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    let mut summary = BatchSummary::default();

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|header| header == "species") {
        return Err(PetAgeError::validation(
            "input",
            "missing required column 'species'",
        ));
    }
    writer.write_record(OUTPUT_HEADERS)?;

    for (index, record) in reader.records().enumerate() {
        // 第一列是標題，資料列從第 2 行開始
        let line = index + 2;
        let row = record.and_then(|record| record.deserialize::<BatchRow>(Some(&headers)));

        let output_row = match row {
            Ok(row) => convert_row(row, decimals, line, &mut summary),
            Err(e) => {
                let e = PetAgeError::from(e);
                tracing::warn!("Row {} rejected: {}", line, e);
                summary.rejected += 1;
                BatchOutputRow {
                    species: String::new(),
                    breed: String::new(),
                    age: String::new(),
                    human_age: None,
                    size_class: None,
                    lifespan: None,
                    error: Some(e.user_friendly_message()),
                }
            }
        };

        writer.serialize(output_row)?;
    }

    writer.flush()?;
    tracing::info!(
        "Batch finished: {} converted, {} rejected",
        summary.converted,
        summary.rejected
    );

    Ok(summary)
}

fn convert_row(row: BatchRow, decimals: usize, line: usize, summary: &mut BatchSummary) -> BatchOutputRow {
    let form = FormInput {
        species: row.species.clone(),
        age: row.age.clone(),
        breed: row.breed.clone(),
        custom_breed: None,
    };

    match parse_form(&form) {
        Ok(query) => {
            let result = convert(&query);
            summary.converted += 1;
            BatchOutputRow {
                species: query.species.to_string(),
                breed: query.breed,
                age: row.age.unwrap_or_default(),
                human_age: Some(format!(
                    "{:.*}",
                    decimals,
                    round_for_display(result.human_age, decimals)
                )),
                size_class: result.size_class.map(|size| size.label()),
                lifespan: Some(profile(query.species).typical_lifespan),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Row {} rejected: {}", line, e);
            summary.rejected += 1;
            BatchOutputRow {
                species: row.species,
                breed: row.breed.unwrap_or_default(),
                age: row.age.unwrap_or_default(),
                human_age: None,
                size_class: None,
                lifespan: None,
                error: Some(e.user_friendly_message()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (BatchSummary, String) {
        let mut output = Vec::new();
        let summary = convert_csv(input.as_bytes(), &mut output, 1).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_converts_valid_rows() {
        let input = "species,breed,age\ndog,Chihuahua,5\ncat,,10\nhamster,Syrian,2\n";
        let (summary, output) = run(input);

        assert_eq!(summary, BatchSummary { converted: 3, rejected: 0 });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "species,breed,age,human_age,size_class,lifespan,error"
        );
        assert_eq!(lines[1], "dog,Chihuahua,5,36.0,small,10-13 years,");
        assert_eq!(lines[2], "cat,,10,56.0,,12-18 years,");
        assert_eq!(lines[3], "hamster,Syrian,2,50.0,,2-3 years,");
    }

    #[test]
    fn test_invalid_rows_are_reported_and_counted() {
        let input = "species,breed,age\ndog,,3\nferret,,1\nbird,,-2\nrabbit,,4\n";
        let (summary, output) = run(input);

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.rejected, 3);
        assert_eq!(summary.total(), 4);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("dog,,3,,,,"));
        assert!(lines[1].contains("breed"));
        assert!(lines[2].contains("unknown species"));
        assert!(lines[3].contains("negative"));
        assert_eq!(lines[4], "rabbit,,4,32.0,,8-12 years,");
    }

    #[test]
    fn test_short_row_is_rejected_and_batch_continues() {
        let input = "species,breed,age\ndog,Beagle,3\ndog,Pug\nrabbit,,4\n";
        let (summary, output) = run(input);

        assert_eq!(summary, BatchSummary { converted: 2, rejected: 1 });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "dog,Beagle,3,29.0,medium,10-13 years,");
        assert_eq!(lines[2], "dog,Pug,,,,,Please provide the pet's age.");
        assert_eq!(lines[3], "rabbit,,4,32.0,,8-12 years,");
    }

    #[test]
    fn test_header_only_input_still_writes_header() {
        let (summary, output) = run("species,breed,age\n");

        assert_eq!(summary, BatchSummary::default());
        assert_eq!(
            output,
            "species,breed,age,human_age,size_class,lifespan,error\n"
        );
    }

    #[test]
    fn test_missing_species_column_is_rejected() {
        let mut output = Vec::new();
        let err = convert_csv("breed,age\nPug,3\n".as_bytes(), &mut output, 1).unwrap_err();

        assert!(matches!(err, PetAgeError::ValidationError { .. }));
        assert!(output.is_empty());
    }

    #[test]
    fn test_fractional_ages_are_rounded_for_display() {
        let (_, output) = run("species,breed,age\ndog,Beagle,1.5\n");
        assert!(output.contains("dog,Beagle,1.5,19.5,medium,"));
    }
}
