pub mod audit;
pub mod companies;
pub mod exams;
pub mod frontpage;
pub mod jobs;
pub mod packets;
