pub mod dispatch;
pub mod inventory;
pub mod normalize;
pub mod presence;
pub mod queue;
pub mod texture;
