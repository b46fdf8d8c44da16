//! # CARET - Computerized Anatomical Reconstruction and Editing Toolkit (core)
//!
//! Host-independent pieces of the CARET workstation: the auto-loaders that swap
//! data files in as the user probes voxels and surface nodes, and the voxel
//! brush used by the paint volume editor.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! caret = "0.3"  # Default: autoload + volume-edit
//! ```
//!
//! ## Feature Flags
//!
//! - **`autoload`** (default): loader families, manager, probe dispatcher, scenes
//! - **`volume-edit`** (default): voxel brush engine, undo stack, paint editor
//! - **`file-logging`**: JSON log files with run-folder retention, used by
//!   [`logging::init_from_config`] when `[logging] file_logging = true`
//!
//! ## Usage Examples
//!
//! ### Auto-loading
//!
//! ```rust,no_run
//! use caret::logging::LoggingHandle;
//! use caret::prelude::*;
//!
//! fn build() -> Result<(AutoLoaderManager, LoggingHandle), Box<dyn std::error::Error>> {
//!     let config = caret::config::load_config(None, None)?;
//!     let logging = caret::logging::init_from_config(
//!         &config.logging,
//!         &caret::observability::parse_debug_flags(),
//!     )?;
//!     let mut manager = AutoLoaderManager::new(&config.autoload)?;
//!     if let Some(loader) = manager.metric_voxel_loader_mut(0) {
//!         loader.state_mut().set_enabled(true);
//!         loader.state_mut().set_directory("/data/correlations");
//!         loader.state_mut().set_anatomy_volume(Some(VolumeHandle::new(1)));
//!     }
//!     Ok((manager, logging))
//! }
//!
//! fn on_click(
//!     manager: &mut AutoLoaderManager,
//!     data: &dyn BrainDataSet,
//!     files: &mut dyn FileRepository,
//!     coloring: &mut dyn ColoringState,
//! ) {
//!     let mut ctx = AutoLoadContext::new(data, files, coloring);
//!     let report = manager.dispatch_voxel_probe([12.0, -40.5, 8.0], &mut ctx);
//!     if !report.is_empty() {
//!         eprintln!("{}", report);
//!     }
//! }
//! ```
//!
//! ### Paint editing
//!
//! ```rust
//! use caret::prelude::*;
//!
//! let mut engine = VoxelBrushEngine::new(64);
//! engine.attach(LabelVolume::new(VolumeDimensions::new(16, 16, 16)?));
//! engine.set_brush_size(1)?;
//! engine.set_active_slice_axis(VolumeAxis::Z);
//! engine.paint(VoxelIJK::new(5, 5, 5), 7)?;
//! engine.undo();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export foundation
pub use caret_config as config;
pub use caret_observability as observability;
pub use caret_structures as structures;

pub mod logging;

// Re-export core subsystems
#[cfg(feature = "autoload")]
pub use caret_autoload as autoload;

#[cfg(feature = "volume-edit")]
pub use caret_volume_edit as volume_edit;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::structures::*;

    pub use crate::config::{CaretConfig, ConfigError};

    #[cfg(feature = "autoload")]
    pub use crate::autoload::{
        AutoLoadContext, AutoLoadError, AutoLoader, AutoLoaderManager, BrainDataSet,
        ColoringState, DispatchReport, FileRepository, InstalledSlot, Pick, ProbeDispatcher,
        Scene,
    };

    #[cfg(feature = "volume-edit")]
    pub use crate::volume_edit::{
        BrushError, LabelVolume, NameLookup, PaintEditor, VolumeGrid, VoxelBrushEngine,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let voxel = VoxelIJK::new(1, 2, 3);
        assert!(voxel.is_valid());
        assert!(crate::config::validate_config(&CaretConfig::default()).is_ok());
    }
}
