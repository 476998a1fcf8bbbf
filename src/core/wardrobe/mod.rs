mod item;
mod store;

pub use item::{Category, ClothingItem};
pub use store::{StoreStats, Wardrobe, WardrobeStore};
