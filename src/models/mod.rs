pub mod auth;
pub mod collection_point;
pub mod graph;
pub mod itinerary;
pub mod neighborhood;
pub mod page;
pub mod residue;
pub mod resource;
pub mod route;
pub mod street;
pub mod truck;

pub use auth::{LoginCredentials, LoginResponse, User};
pub use collection_point::{CollectionPoint, CollectionPointRequest};
pub use graph::{GraphData, GraphEdge, GraphNode};
pub use itinerary::{Itinerary, ItineraryRequest};
pub use neighborhood::{Neighborhood, NeighborhoodRequest};
pub use page::{Page, PageRequest, SortDirection};
pub use residue::ResidueType;
pub use resource::{EntityId, Resource};
pub use route::{Route, RouteRequest, RouteStop};
pub use street::{Street, StreetRequest};
pub use truck::{Truck, TruckRequest};
