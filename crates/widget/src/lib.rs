pub mod context;
pub mod page;
pub mod pagination;
pub mod render;

pub use context::{AppContext, Region, APP_NAME};
pub use page::{PageError, PageInitializer, PageState};
pub use pagination::{Pager, PaginationError, PAGE_LENGTHS};
pub use render::{render_table, show_search_error, show_search_result};

pub const BANNER: &str =
    "This is the Araport science app for Arabidopsis thaliana small RNA - Phasing Analysis.";
