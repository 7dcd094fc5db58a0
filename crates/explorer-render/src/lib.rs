//! HTML rendering for the settings explorer.
//!
//! Every view is a projection of an [`explorer_core::ExplorerSession`]:
//! rows, facet pill groups with counts and tooltips, the summary line and a
//! complete standalone page.

mod controls;
mod error;
mod html;
mod page;
mod row;

pub use controls::{PageLayout, render_facet_group};
pub use error::{RenderError, Result};
pub use page::{
    PageOptions, render_facets, render_list, render_load_error, render_page, render_summary,
};
pub use row::{RowContext, render_row, truncate_preview};
