pub mod frame;
pub mod grid;
pub mod interaction;
pub mod scene;
pub mod shapes;
pub mod viewport;

pub use frame::compose_frame;
pub use interaction::InteractionController;
pub use scene::{SceneModel, SnapshotError, decode_snapshot};
pub use viewport::Viewport;
