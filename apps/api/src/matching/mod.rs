// Resume matching: keyword scoring, highlighting, role suggestion and feedback.
// Pure computation over extracted text. The role catalog is injected, never global.

pub mod analysis;
pub mod catalog;
pub mod feedback;
pub mod handlers;
pub mod highlight;
pub mod scoring;
pub mod suggest;
pub mod tokens;
