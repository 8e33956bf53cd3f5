//! The image mapper shell.
//!
//! [`ImageMapper`] owns one drawing surface and turns host props plus pointer
//! input into highlight paints and host callbacks:
//!
//! - **Lifecycle**: `Unmounted → AwaitingImage → Ready`, driven by
//!   [`ImageMapper::mount`] and the one-shot [`ImageMapper::image_loaded`]
//! - **Sizing**: on ready and whenever the target size changes, the container
//!   and surface are resized and persistent highlights repainted
//! - **Interaction**: pointer input is hit tested against the scaled regions and
//!   dispatched to [`MapperHandlers`] and the highlight policy
//! - **Re-render suppression**: see [`should_rerender`]

mod handlers;
mod options;
mod shell;


pub use handlers::{
    AreaHandler, ChangeHandler, ImageHandler, LoadHandler, LoadedImage, MapperHandlers,
    PointerEvent, PointerKind,
};
pub use options::{HighlightPolicy, MapperOptions, MapperProps, PropKey, should_rerender};
pub use shell::{Container, ImageMapper, MapperRefs, MountState, Region};
