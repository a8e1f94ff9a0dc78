//! `PlantUML` autoinclude resolution for pinc.
//!
//! This crate augments diagram source with configured `!include` directives:
//! - [`Includer`] resolves the include specifiers that apply to a diagram's
//!   workspace folder and splices them in at the `'autoinclude` marker
//! - Specifiers resolve as absolute paths, workspace-relative files or
//!   directories, and bundled `<name>.wsd` includes
//! - Resolution is memoized per folder in an [`IncludeCache`] and refreshed only
//!   when the folder's specifier list changes
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`diagram`]: The [`Diagram`] value consumed by the includer
//! - [`source`]: Collaborator traits ([`IncludeSource`], [`FolderResolver`])
//! - [`cache`]: [`IncludeCache`] and [`SettingsFingerprint`]
//! - [`resolve`]: Specifier resolution and directive formatting
//! - [`marker`]: Autoinclude marker detection and splicing
//! - [`dialect`]: Detection of diagram dialects that cannot take includes
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pinc_config::Config;
//! use pinc_includer::{Diagram, Includer};
//! use pinc_storage::FsStorage;
//!
//! let config = Arc::new(Config::load(None, None)?);
//! let includer = Includer::from_config(config, Arc::new(FsStorage::new()));
//!
//! let diagram = Diagram::new("docs/flow.puml", "@startuml\n'autoinclude\nA -> B\n@enduml");
//! let source = includer.add_includes(&diagram);
//! ```

pub mod cache;
pub mod diagram;
pub mod dialect;
mod includer;
pub mod marker;
pub mod resolve;
pub mod source;

pub use cache::{IncludeCache, IncludeCacheEntry, SettingsFingerprint};
pub use diagram::Diagram;
pub use dialect::cannot_include;
pub use includer::Includer;
pub use source::{FolderResolver, IncludeSource};
