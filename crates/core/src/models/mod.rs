//! Resource models mirrored from the REST API.
//!
//! Summary records appear in list pages; `*Data` types are the detail
//! records returned by `GET /api/<resource>/:id`. Patch and draft DTOs omit
//! `None` members on the wire so a patch only ever touches the fields it
//! names.

pub mod auth;
pub mod business;
pub mod dashboard;
pub mod fundability;
pub mod investor;
pub mod user;

pub use auth::{AuthPayload, RegisterRequest, SessionUser, SignInRequest};
pub use business::{
    Business, BusinessData, BusinessDraft, BusinessPatch, DealRoomDetails, Proposal,
    StartupTestDetails,
};
pub use dashboard::DashboardSummary;
pub use fundability::{
    CategoryScore, FundabilityTest, FundabilityTestData, FundabilityTestDetails,
    FundabilityTestDraft, FundabilityTestPatch, TestAnswer,
};
pub use investor::{Investor, InvestorData, InvestorDraft, InvestorPatch};
pub use user::{User, UserData, UserDraft, UserPatch};
