pub mod dataset;
pub mod enums;
pub mod error;
pub mod setting;

pub use dataset::Dataset;
pub use enums::{Scope, SpecialFlag, Tier, flags_mark_important};
pub use error::{ModelError, Result};
pub use setting::{
    Annotations, Citation, HistoryEntry, Mentions, RelatedSetting, Setting, VersionInfo,
};
