//! Domain layer - Tag codec, definitions and analysis engine

pub mod analysis;
pub mod codec;
pub mod definitions;
pub mod time;

pub use analysis::{AnalysedLog, AnalysedTag, TagKind, VarDataFragment};
pub use codec::RawTag;
pub use definitions::{DefKind, DefinitionTable, TagDefinition};
pub use time::{TickConverter, TimeValue};
