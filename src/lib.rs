// Allows the `Record` derive to expand to `lexideck::` paths from within this crate.
extern crate self as lexideck;

mod domain;
mod record;
mod service;
mod store;

pub use domain::{
    Course, CourseDraft, CoursePatch, CourseStatus, Role, StaffUser, StaffUserDraft,
    StaffUserPatch, Topic, TopicDraft, TopicPatch, Word, WordDraft, WordLevel, WordPatch,
};
pub use record::{
    InMemoryRecordStore, Record, RecordError, RecordRepository, RecordStore, RecordsExt,
    Versioned,
};
pub use service::{
    order_status_from_return, Comment, CreatedOrder, ExerciseService, Folder,
    InMemoryExerciseService, InMemoryPaymentGateway, InMemoryUserDirectory, OrderRequest,
    OrderStatus, Page, PaymentGateway, PaymentOrder, ServiceError, SortKey, UserAccount,
    UserDirectory, UserDraft, UserQuery, UserStatus, UserUpdate,
};
#[cfg(feature = "http")]
pub use service::{HttpExerciseService, HttpPaymentGateway, HttpUserDirectory};
pub use store::{AdminStore, ChangeRecord, LinkChange, Removal, STORE_CHANGED};

// Re-export the Record derive so consumers only need the one crate
pub use lexideck_macros::Record;

// Re-export the EventEmitter from the event_emitter_rs crate
pub use event_emitter_rs::EventEmitter;
