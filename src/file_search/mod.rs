pub mod model;
pub mod operation_handle;

pub use model::{
    CreateFileSearchStoreRequest, FileSearchStore, ListFileSearchStoresResponse, Operation,
    OperationResult, Status, UploadToFileSearchStoreRequest,
};
pub use operation_handle::OperationHandle;
