use crate::{RegressErr, Result};

/// Maps string categories to dense integer codes.
///
/// Classes are the sorted unique labels observed at fit time, so codes are
/// stable across runs for the same column. Constructing the encoder *is*
/// fitting it; an unfitted encoder cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits an encoder over a column of labels.
    ///
    /// # Args
    /// * `labels` - The raw category values of one column.
    ///
    /// # Returns
    /// An encoder whose classes are the sorted unique labels.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_owned())
            .collect();
        classes.sort_unstable();
        classes.dedup();

        Self { classes }
    }

    /// Returns the integer code of a label.
    ///
    /// # Errors
    /// Returns `RegressErr::UnknownLabel` when the label was not part of the
    /// fitting data.
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .map_err(|_| RegressErr::UnknownLabel {
                label: label.to_owned(),
            })
    }

    /// Returns the fitted classes, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
