// Input collection: option catalogs, selector-with-override fields, and the
// multipart submission that carries the job profile, API key and resumes.

pub mod catalog;
pub mod choice;
pub mod form;
pub mod multipart;
