pub mod errors;
pub mod request;
pub mod transport;
pub mod types;
pub mod workflow_scheme;

pub use errors::JiraError;
pub use request::{HttpMethod, RequestDescriptor};
pub use transport::{Auth, HttpTransport, JiraResponse, JiraTransport};
pub use types::WorkflowScheme;
pub use workflow_scheme::{
    CreateWorkflowSchemeOptions, EditWorkflowSchemeOptions, GetWorkflowSchemeOptions, WorkflowSchemeClient,
};
