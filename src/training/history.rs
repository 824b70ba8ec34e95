use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

pub const LOSS: &str = "loss";
pub const VAL_LOSS: &str = "val_loss";
pub const ACCURACY: &str = "accuracy";
pub const VAL_ACCURACY: &str = "val_accuracy";

/// Per-epoch metrics of a training run.
///
/// The four sequences always have the same length, one entry per completed
/// epoch. Values themselves are not range-checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory", into = "RawHistory")]
pub struct TrainingHistory {
    loss: Vec<f64>,
    val_loss: Vec<f64>,
    accuracy: Vec<f64>,
    val_accuracy: Vec<f64>,
}

/// Wire shape of a history, as written by Keras' `history.history`.
/// Unknown keys such as `lr` are ignored.
#[derive(Serialize, Deserialize)]
struct RawHistory {
    loss: Option<Vec<f64>>,
    val_loss: Option<Vec<f64>>,
    accuracy: Option<Vec<f64>>,
    val_accuracy: Option<Vec<f64>>,
}

impl TryFrom<RawHistory> for TrainingHistory {
    type Error = HistoryError;

    fn try_from(raw: RawHistory) -> Result<Self> {
        TrainingHistory::new(
            required(LOSS, raw.loss)?,
            required(VAL_LOSS, raw.val_loss)?,
            required(ACCURACY, raw.accuracy)?,
            required(VAL_ACCURACY, raw.val_accuracy)?,
        )
    }
}

impl From<TrainingHistory> for RawHistory {
    fn from(history: TrainingHistory) -> Self {
        RawHistory {
            loss: Some(history.loss),
            val_loss: Some(history.val_loss),
            accuracy: Some(history.accuracy),
            val_accuracy: Some(history.val_accuracy),
        }
    }
}

fn required(name: &str, values: Option<Vec<f64>>) -> Result<Vec<f64>> {
    values.ok_or_else(|| HistoryError::MissingMetric {
        name: name.to_string(),
    })
}

/// Final values and best epochs of a non-empty history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub epochs: usize,
    pub final_loss: f64,
    pub final_val_loss: f64,
    pub final_accuracy: f64,
    pub final_val_accuracy: f64,
    pub best_val_accuracy_epoch: usize,
    pub best_val_loss_epoch: usize,
}

impl TrainingHistory {
    /// Builds a history from complete sequences.
    ///
    /// Fails with [`HistoryError::EmptyHistory`] when there are no epochs and
    /// with [`HistoryError::MismatchedLength`] when any sequence differs in
    /// length from `loss`. Mismatched sequences are never truncated or padded.
    pub fn new(
        loss: Vec<f64>,
        val_loss: Vec<f64>,
        accuracy: Vec<f64>,
        val_accuracy: Vec<f64>,
    ) -> Result<Self> {
        if loss.is_empty() {
            return Err(HistoryError::EmptyHistory);
        }

        let expected = loss.len();
        for (name, values) in [
            (VAL_LOSS, &val_loss),
            (ACCURACY, &accuracy),
            (VAL_ACCURACY, &val_accuracy),
        ] {
            if values.len() != expected {
                return Err(HistoryError::MismatchedLength {
                    name: name.to_string(),
                    expected,
                    found: values.len(),
                });
            }
        }

        Ok(TrainingHistory {
            loss,
            val_loss,
            accuracy,
            val_accuracy,
        })
    }

    /// Resolves the four metrics out of a name-keyed bag of sequences.
    /// Keys other than the four metric names are dropped.
    pub fn from_metrics(mut metrics: HashMap<String, Vec<f64>>) -> Result<Self> {
        let mut take = |name: &str| required(name, metrics.remove(name));
        let loss = take(LOSS)?;
        let val_loss = take(VAL_LOSS)?;
        let accuracy = take(ACCURACY)?;
        let val_accuracy = take(VAL_ACCURACY)?;
        TrainingHistory::new(loss, val_loss, accuracy, val_accuracy)
    }

    /// Appends one epoch.
    pub fn record(&mut self, loss: f64, val_loss: f64, accuracy: f64, val_accuracy: f64) {
        self.loss.push(loss);
        self.val_loss.push(val_loss);
        self.accuracy.push(accuracy);
        self.val_accuracy.push(val_accuracy);
    }

    pub fn epochs(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    pub fn loss(&self) -> &[f64] {
        &self.loss
    }

    pub fn val_loss(&self) -> &[f64] {
        &self.val_loss
    }

    pub fn accuracy(&self) -> &[f64] {
        &self.accuracy
    }

    pub fn val_accuracy(&self) -> &[f64] {
        &self.val_accuracy
    }

    pub fn summary(&self) -> Option<HistorySummary> {
        let last = self.epochs().checked_sub(1)?;
        Some(HistorySummary {
            epochs: self.epochs(),
            final_loss: self.loss[last],
            final_val_loss: self.val_loss[last],
            final_accuracy: self.accuracy[last],
            final_val_accuracy: self.val_accuracy[last],
            best_val_accuracy_epoch: first_best(&self.val_accuracy, |a, b| a > b),
            best_val_loss_epoch: first_best(&self.val_loss, |a, b| a < b),
        })
    }
}

// First epoch holding the best value; ties keep the earlier epoch.
fn first_best(values: &[f64], better: impl Fn(f64, f64) -> bool) -> usize {
    let mut best = 0;
    for (epoch, &value) in values.iter().enumerate().skip(1) {
        if better(value, values[best]) {
            best = epoch;
        }
    }
    best
}
