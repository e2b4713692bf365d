//! Remote collaborators — typed clients for the platform's backend services.
//!
//! The admin store is purely local; everything else the platform's pages
//! touch goes through one of these contracts:
//!
//! - [`UserDirectory`]: server-side paginated user administration
//!   (list/create/update/soft-delete/restore).
//! - [`PaymentGateway`]: order creation with an optional redirect to an
//!   external payment gateway, status checks, cancellation, and the
//!   return-callback status mapping.
//! - [`ExerciseService`]: exercise/material content (folders, likes,
//!   comments).
//!
//! Each contract ships with an in-memory implementation for tests and
//! single-process use, and — behind the `http` feature — a reqwest-backed
//! client. Calls are plain request/response: no retry, no backoff, no
//! sequencing between overlapping requests (last response wins at the
//! caller).

mod error;
mod exercise;
#[cfg(feature = "http")]
mod http;
mod payment;
mod users;

pub use error::ServiceError;
pub use exercise::{Comment, ExerciseService, Folder, InMemoryExerciseService};
pub use payment::{
    order_status_from_return, CreatedOrder, InMemoryPaymentGateway, OrderRequest, OrderStatus,
    PaymentGateway, PaymentOrder,
};
pub use users::{
    InMemoryUserDirectory, Page, SortKey, UserAccount, UserDirectory, UserDraft, UserQuery,
    UserStatus, UserUpdate,
};

#[cfg(feature = "http")]
pub use http::{HttpExerciseService, HttpPaymentGateway, HttpUserDirectory};
