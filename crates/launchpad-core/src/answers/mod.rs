//! The answer record accumulated across wizard steps.
//!
//! An [`AnswerRecord`] only changes through [`AnswerRecord::apply`], which
//! merges an [`AnswerPatch`] and enforces the record's invariants as part of
//! the merge:
//!
//! - `main_goal` and `custom_goal` are never both non-empty; setting one
//!   clears the other.
//! - `channels` never holds more than [`MAX_CHANNELS`] entries; a patch that
//!   would exceed the cap is rejected and the record is left untouched.

pub mod options;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

pub use options::{Channel, Customer, Goal, OptionParseError, Tone};

/// Maximum number of promotion channels a record may hold.
pub const MAX_CHANNELS: usize = 3;

/// Errors from merging a patch or loading an answers file.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("at most {max} channels may be selected (got {requested})", max = MAX_CHANNELS)]
    ChannelLimit { requested: usize },

    #[error("a listed goal ({main:?}) and a custom goal ({custom:?}) cannot both be set")]
    ConflictingGoals { main: Goal, custom: String },

    #[error("failed to read answers file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("answers file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    UnknownOption(#[from] OptionParseError),
}

/// Everything the user has answered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    pub business_name: String,
    pub main_customers: Vec<Customer>,
    pub custom_customer: String,
    pub main_goal: Option<Goal>,
    pub custom_goal: String,
    pub special_offer: String,
    pub tone: Option<Tone>,
    pub unique: String,
    pub channels: Vec<Channel>,
    pub budget: String,
    pub timeframe: String,
}

/// A partial update to an [`AnswerRecord`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPatch {
    pub business_name: Option<String>,
    pub main_customers: Option<Vec<Customer>>,
    pub custom_customer: Option<String>,
    pub main_goal: Option<Option<Goal>>,
    pub custom_goal: Option<String>,
    pub special_offer: Option<String>,
    pub tone: Option<Option<Tone>>,
    pub unique: Option<String>,
    pub channels: Option<Vec<Channel>>,
    pub budget: Option<String>,
    pub timeframe: Option<String>,
}

impl AnswerPatch {
    pub fn business_name(mut self, value: impl Into<String>) -> Self {
        self.business_name = Some(value.into());
        self
    }

    pub fn main_customers(mut self, value: Vec<Customer>) -> Self {
        self.main_customers = Some(value);
        self
    }

    pub fn custom_customer(mut self, value: impl Into<String>) -> Self {
        self.custom_customer = Some(value.into());
        self
    }

    /// Select a listed goal. Clears any custom goal on merge.
    pub fn main_goal(mut self, goal: Goal) -> Self {
        self.main_goal = Some(Some(goal));
        self
    }

    /// Set a free-text goal. A non-empty value clears the listed goal on merge.
    pub fn custom_goal(mut self, value: impl Into<String>) -> Self {
        self.custom_goal = Some(value.into());
        self
    }

    pub fn special_offer(mut self, value: impl Into<String>) -> Self {
        self.special_offer = Some(value.into());
        self
    }

    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(Some(tone));
        self
    }

    pub fn unique(mut self, value: impl Into<String>) -> Self {
        self.unique = Some(value.into());
        self
    }

    pub fn channels(mut self, value: Vec<Channel>) -> Self {
        self.channels = Some(value);
        self
    }

    pub fn budget(mut self, value: impl Into<String>) -> Self {
        self.budget = Some(value.into());
        self
    }

    pub fn timeframe(mut self, value: impl Into<String>) -> Self {
        self.timeframe = Some(value.into());
        self
    }
}

impl AnswerRecord {
    /// Merge `patch` into the record.
    ///
    /// The patch is validated in full before any field is written, so a
    /// rejected patch leaves the record exactly as it was.
    pub fn apply(&mut self, patch: AnswerPatch) -> Result<(), AnswerError> {
        if let (Some(Some(main)), Some(custom)) = (&patch.main_goal, &patch.custom_goal) {
            if !custom.is_empty() {
                return Err(AnswerError::ConflictingGoals {
                    main: *main,
                    custom: custom.clone(),
                });
            }
        }

        let channels = patch.channels.map(dedup);
        if let Some(ref channels) = channels {
            if channels.len() > MAX_CHANNELS {
                return Err(AnswerError::ChannelLimit {
                    requested: channels.len(),
                });
            }
        }

        if let Some(v) = patch.business_name {
            self.business_name = v;
        }
        if let Some(v) = patch.main_customers {
            self.main_customers = dedup(v);
        }
        if let Some(v) = patch.custom_customer {
            self.custom_customer = v;
        }
        if let Some(goal) = patch.main_goal {
            self.main_goal = goal;
            if goal.is_some() {
                self.custom_goal.clear();
            }
        }
        if let Some(v) = patch.custom_goal {
            if !v.is_empty() {
                self.main_goal = None;
            }
            self.custom_goal = v;
        }
        if let Some(v) = patch.special_offer {
            self.special_offer = v;
        }
        if let Some(v) = patch.tone {
            self.tone = v;
        }
        if let Some(v) = patch.unique {
            self.unique = v;
        }
        if let Some(v) = channels {
            self.channels = v;
        }
        if let Some(v) = patch.budget {
            self.budget = v;
        }
        if let Some(v) = patch.timeframe {
            self.timeframe = v;
        }

        Ok(())
    }

    /// Listed customers followed by the custom customer, if any.
    /// Duplicates between the two are kept.
    pub fn effective_customers(&self) -> Vec<String> {
        let mut customers: Vec<String> = self
            .main_customers
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        if !self.custom_customer.is_empty() {
            customers.push(self.custom_customer.clone());
        }
        customers
    }

    /// The listed goal's label, or the custom goal text.
    pub fn effective_goal(&self) -> &str {
        match self.main_goal {
            Some(goal) => goal.label(),
            None => &self.custom_goal,
        }
    }

    /// Patch that adds `customer` if absent, or removes it if present.
    pub fn toggle_customer(&self, customer: Customer) -> AnswerPatch {
        AnswerPatch::default().main_customers(toggled(&self.main_customers, customer))
    }

    /// Patch that adds `channel` if absent, or removes it if present.
    ///
    /// Adding a fourth channel yields a patch that [`AnswerRecord::apply`]
    /// rejects.
    pub fn toggle_channel(&self, channel: Channel) -> AnswerPatch {
        AnswerPatch::default().channels(toggled(&self.channels, channel))
    }

    /// Whether `channel` can currently be picked (it is already selected or
    /// there is room for one more).
    pub fn channel_selectable(&self, channel: Channel) -> bool {
        self.channels.contains(&channel) || self.channels.len() < MAX_CHANNELS
    }

    /// Parse an answers file. Fields go through [`AnswerRecord::apply`], so
    /// the record invariants hold for loaded answers too.
    pub fn from_toml_str(contents: &str) -> Result<Self, AnswerError> {
        let file: AnswersFile = toml::from_str(contents)?;
        let mut record = AnswerRecord::default();
        record.apply(file.into_patch()?)?;
        Ok(record)
    }

    /// Read and parse an answers file from disk.
    pub fn load(path: &Path) -> Result<Self, AnswerError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AnswerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// On-disk shape of an answers file. Every key is optional; choice fields
/// hold labels and are parsed when the file becomes a patch.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AnswersFile {
    business_name: String,
    main_customers: Vec<String>,
    custom_customer: String,
    main_goal: Option<String>,
    custom_goal: String,
    special_offer: String,
    tone: Option<String>,
    unique: String,
    channels: Vec<String>,
    budget: String,
    timeframe: String,
}

impl AnswersFile {
    fn into_patch(self) -> Result<AnswerPatch, AnswerError> {
        Ok(AnswerPatch {
            business_name: Some(self.business_name),
            main_customers: Some(parse_labels(&self.main_customers)?),
            custom_customer: Some(self.custom_customer),
            main_goal: Some(self.main_goal.as_deref().map(str::parse).transpose()?),
            custom_goal: Some(self.custom_goal),
            special_offer: Some(self.special_offer),
            tone: Some(self.tone.as_deref().map(str::parse).transpose()?),
            unique: Some(self.unique),
            channels: Some(parse_labels(&self.channels)?),
            budget: Some(self.budget),
            timeframe: Some(self.timeframe),
        })
    }
}

fn parse_labels<T>(labels: &[String]) -> Result<Vec<T>, OptionParseError>
where
    T: FromStr<Err = OptionParseError>,
{
    labels.iter().map(|label| label.parse()).collect()
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn toggled<T: PartialEq + Copy>(items: &[T], item: T) -> Vec<T> {
    if items.contains(&item) {
        items.iter().copied().filter(|x| *x != item).collect()
    } else {
        let mut out = items.to_vec();
        out.push(item);
        out
    }
}
