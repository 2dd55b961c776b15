//! Pages
//!
//! One top-level component per route.

mod workflow_page;
mod report_page;
mod create_project_page;

pub use workflow_page::WorkflowPage;
pub use report_page::ReportPage;
pub use create_project_page::CreateProjectPage;
