pub mod budget;
pub mod ledger;
pub mod storage;
