pub mod endpoints;

mod client;
mod error;
mod macros;
mod poller;
pub mod repositories;
mod runner;

pub use crate::client::{Client, Method, Request as ApiRequest, RequestData};
pub use crate::error::ApiError;
pub use crate::poller::{ImportError, ImportPoller};
pub use crate::runner::{ImportRunner, ImportUpdate};
use repositories::*;

/// Entry point for building typed registry requests.
///
/// ```no_run
/// use skillhub_api::{Client, Request};
///
/// # async fn demo() -> Result<(), skillhub_api::ApiError> {
/// let client = Client::new("http://localhost:8086");
/// let skills = client.send(Request::skills().list().page(1u32)).await?;
/// # Ok(())
/// # }
/// ```
pub struct Request;

impl Request {
    pub fn skills() -> SkillRepository {
        SkillRepository::new()
    }

    pub fn categories() -> CategoryRepository {
        CategoryRepository::new()
    }

    pub fn tags() -> TagRepository {
        TagRepository::new()
    }

    pub fn authors() -> AuthorRepository {
        AuthorRepository::new()
    }

    pub fn import() -> ImportRepository {
        ImportRepository::new()
    }

    pub fn files() -> FileRepository {
        FileRepository::new()
    }
}
