pub mod client;
pub mod content;
pub mod error;
pub mod forms;
pub mod markup;
pub mod redirects;
pub mod sports;

pub use client::{ClientConfig, GraphQlClient};
pub use content::ContentClient;
pub use error::ContentError;
pub use forms::{FormOutcome, FormRelay, FormSubmission};
pub use markup::HeaderSnapshot;
pub use redirects::RedirectLookup;
pub use sports::SportsClient;
