//! Readable .NET stack traces.
//!
//! Captured frames name compiler-generated routines (`<Main>b__0_0`,
//! `MoveNext` on `<LoadAsync>d__3`, `get_Item`). This crate renders them the
//! way they were written: `Action Program.Handler()`,
//! `async Task<int> Worker.LoadAsync(string path)`, `int Grid[int index]`.
//!
//! Reflection facts come from a [`metadata::MetadataProvider`];
//! [`trace::StackRenderer`] walks the frames and produces an
//! [`trace::EnhancedTrace`].

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod alias;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod serializers;
pub mod snapshot;
pub mod trace;

pub use alias::Resolvers;
pub use error::TraceError;
pub use metadata::{MetadataProvider, MetadataTable, RawFrame};
pub use snapshot::{SnapshotError, TraceSnapshot};
pub use trace::{EnhancedTrace, RenderOptions, RenderedFrame, StackRenderer};
