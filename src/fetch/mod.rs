//! Paginated fetching
//!
//! Streams the records of a remote paged collection to a consumer, one page
//! at a time, until the collection is exhausted, the consumer or row budget
//! asks to stop, the query is cancelled, or the remote call fails.

pub mod budget;
pub mod paginate;
pub mod stream;

pub use budget::QueryBudget;
pub use paginate::{
    FetchOutcome, FetchSummary, MAX_PAGE_SIZE, Page, PageInfo, PageSource, adjust_page_size,
    paginate, paginate_async,
};
pub use stream::stream_pages;
