pub mod submission;

pub use submission::{NewSubmission, Photo, Submission};
