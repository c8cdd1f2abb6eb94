// src/picker/bank.rs

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::{collections::HashMap, fs::File, path::Path};
use tracing::{debug, info};

use crate::error::{PickstatError, Result};

/// One row of the questions file. Header names are trimmed on load.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Question")]
    question: String,
}

/// All questions, partitioned by category.
#[derive(Debug, Default, Clone)]
pub struct QuestionBank {
    /// Categories in order of first appearance.
    categories: Vec<String>,
    pools: HashMap<String, Vec<String>>,
}

impl QuestionBank {
    /// Build from (category, question) pairs, keeping source order and duplicates.
    pub fn from_pairs<I, C, Q>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, Q)>,
        C: Into<String>,
        Q: Into<String>,
    {
        let mut bank = Self::default();
        for (c, q) in pairs {
            bank.push(c.into(), q.into());
        }
        bank
    }

    fn push(&mut self, category: String, question: String) {
        match self.pools.get_mut(&category) {
            Some(pool) => pool.push(question),
            None => {
                self.categories.push(category.clone());
                self.pools.insert(category, vec![question]);
            }
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Full pool for `category`; empty for an unknown category.
    pub fn pool(&self, category: &str) -> &[String] {
        self.pools.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a two-column (Category, Question) CSV from any reader.
pub fn parse_questions<R: std::io::Read>(rdr: R) -> std::result::Result<QuestionBank, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(rdr);

    let mut bank = QuestionBank::default();
    for result in rdr.deserialize() {
        let rec: QuestionRecord = result?;
        bank.push(rec.category, rec.question);
    }
    Ok(bank)
}

/// Load the questions file. A missing or malformed file is a `DataLoad` error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<QuestionBank> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PickstatError::data_load(path, e))?;
    let bank = parse_questions(file).map_err(|e| PickstatError::data_load(path, e))?;
    debug!(categories = ?bank.categories(), "parsed question bank");
    info!(
        questions = bank.len(),
        categories = bank.categories().len(),
        "loaded questions"
    );
    Ok(bank)
}
