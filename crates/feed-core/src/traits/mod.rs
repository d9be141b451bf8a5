//! Ports - interfaces the domain needs from infrastructure

mod transfer;

pub use transfer::{
    Method, RequestBody, Target, TransferClient, TransferRequest, TransferResponse,
    TransferResult, TransportError,
};
