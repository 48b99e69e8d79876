//! Whitespace-delimited text dataset loader (§4.11). Each line is `F`
//! feature tokens followed by one integer label; `F` is inferred from the
//! first line and `K` (class count) from the maximum label seen across
//! every file passed to `load_data`.

use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{array::Array2D, error, literal};

pub struct Dataset {
    pub features: usize,
    pub data: Array2D<literal::Word>,
    pub labels: Vec<usize>,
}

/// Parse one file into raw feature rows and labels, given the expected
/// token count (0 to infer it from the first line).
fn load_file(path: &Path, mut expected: usize) -> (Vec<Vec<u32>>, Vec<usize>) {
    let file = std::fs::File::open(path).unwrap_or_else(|_| error::missing_dataset(path));
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.unwrap_or_else(|_| error::missing_dataset(path));
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if expected == 0 {
            expected = tokens.len() - 1;
        }
        if tokens.len() != expected + 1 {
            error::malformed_sample(path, i + 1, expected + 1, tokens.len());
        }

        let mut row = Vec::with_capacity(expected);
        for tok in &tokens[..expected] {
            row.push(tok.parse::<u32>().unwrap_or_else(|_| {
                error::malformed_sample(path, i + 1, expected + 1, tokens.len())
            }));
        }
        let label = tokens[expected].parse::<i64>().unwrap_or_else(|_| {
            error::malformed_sample(path, i + 1, expected + 1, tokens.len())
        });
        if label < 0 {
            error::malformed_sample(path, i + 1, expected + 1, tokens.len());
        }

        rows.push(row);
        labels.push(label as usize);
    }

    (rows, labels)
}

/// Load and pack a single dataset file, given a known feature count (used
/// once the training file has already fixed `F`).
pub fn load_data(path: &Path, features: usize) -> Dataset {
    let (rows, labels) = load_file(path, features);
    let mut data = Array2D::<literal::Word>::new(rows.len(), literal::literal_words(features));
    for (i, row) in rows.iter().enumerate() {
        data.row_mut(i).copy_from_slice(&literal::encode(row));
    }
    Dataset { features, data, labels }
}

/// Load the training file, inferring `F` from its first line.
pub fn load_training_data(path: &Path) -> Dataset {
    let (rows, labels) = load_file(path, 0);
    let features = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut data = Array2D::<literal::Word>::new(rows.len(), literal::literal_words(features));
    for (i, row) in rows.iter().enumerate() {
        data.row_mut(i).copy_from_slice(&literal::encode(row));
    }
    Dataset { features, data, labels }
}

pub fn class_count(datasets: &[&Dataset]) -> usize {
    datasets
        .iter()
        .flat_map(|d| d.labels.iter())
        .copied()
        .max()
        .map(|m| m + 1)
        .unwrap_or(0)
}

/// Copy out `count` rows of `dataset` via the shared PRNG's partial
/// Fisher-Yates (§4.11), for a fast proxy accuracy metric during training.
/// This is a sample *for evaluation only* — unlike a held-out split, the
/// rows it copies are not removed from `dataset`, which training continues
/// to use in full.
pub fn sample_data(dataset: &Dataset, count: usize, rng: &mut crate::rand::Pcg32) -> Dataset {
    let n = dataset.labels.len();
    let chosen = rng.sample_indices(n, count.min(n));

    let columns = dataset.data.columns;
    let mut data = Array2D::<literal::Word>::new(chosen.len(), columns);
    let mut labels = Vec::with_capacity(chosen.len());
    for (i, &src) in chosen.iter().enumerate() {
        data.row_mut(i).copy_from_slice(dataset.data.row(src));
        labels.push(dataset.labels[src]);
    }

    Dataset { features: dataset.features, data, labels }
}
