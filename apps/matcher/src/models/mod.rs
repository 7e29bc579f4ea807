pub mod candidate;
pub mod matches;
pub mod posting;

pub use candidate::CandidateProfile;
pub use matches::MatchRecord;
pub use posting::Posting;
