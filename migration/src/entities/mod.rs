pub mod bookmark;
pub mod route_index;

pub use bookmark::Entity as BookmarkEntity;
pub use route_index::Entity as RouteIndexEntity;
