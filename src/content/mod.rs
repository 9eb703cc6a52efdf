//! Content models and the operations over them

pub mod adjacent;
pub mod paginator;
pub mod post;
pub mod richtext;

pub use adjacent::{Adjacent, AdjacencyResolver, Candidate};
pub use paginator::{Feed, LoadMore, Page, Paginator, MAX_PAGE_SIZE};
pub use post::{AdjacentLink, ContentSection, PostDetail, PostId, PostSummary};
