//! Embedded sled backend
//!
//! Each table is two trees: the records themselves, keyed by an id from
//! `generate_id` so iteration follows insertion order, and an index from the
//! record key to the ids of every record with that key, oldest first. Both
//! trees change inside one transaction.
use std::path::Path;

use sled::transaction::{
    ConflictableTransactionResult, TransactionError, Transactional, TransactionalTree,
};

use crate::{
    error::{AppError, AppResult},
    store::{Record, RecordStore, Table},
};

const INDEX_PREFIX: &str = "index/";
const SLOT_LEN: usize = 8;

// Big-endian so the tree's byte order matches id order
fn serialize_slot(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

/// Removes every record indexed under `key`; returns whether any existed
fn remove_all(
    records: &TransactionalTree,
    index: &TransactionalTree,
    key: &str,
) -> ConflictableTransactionResult<bool, ()> {
    match index.remove(key)? {
        Some(slots) => {
            for slot in slots.chunks_exact(SLOT_LEN) {
                records.remove(slot)?;
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn map_transaction_error(err: TransactionError<()>) -> AppError {
    match err {
        TransactionError::Storage(e) => AppError::Storage(e),
        TransactionError::Abort(()) => {
            AppError::Internal("Record store transaction aborted".to_string())
        }
    }
}

pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        Ok(Self::new(sled::open(path)?))
    }

    pub fn new(db: sled::Db) -> Self {
        Self { db }
    }

    fn trees(&self, table: &Table) -> AppResult<(sled::Tree, sled::Tree)> {
        let name = table.to_string();
        let records = self.db.open_tree(&name)?;
        let index = self.db.open_tree(format!("{}{}", INDEX_PREFIX, name))?;
        Ok((records, index))
    }

    fn decode(bytes: &[u8]) -> AppResult<Record> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl RecordStore for SledStore {
    fn table_exists(&self, table: &Table) -> AppResult<bool> {
        let name = table.to_string();
        Ok(self
            .db
            .tree_names()
            .iter()
            .any(|tree| &**tree == name.as_bytes()))
    }

    fn create_table(&self, table: &Table) -> AppResult<()> {
        let (records, index) = self.trees(table)?;
        records.clear()?;
        index.clear()?;
        tracing::debug!(table = %table, "Table tree created");
        Ok(())
    }

    fn get(&self, table: &Table, key: &str) -> AppResult<Option<String>> {
        let (records, index) = self.trees(table)?;
        let Some(slots) = index.get(key)? else {
            return Ok(None);
        };
        let Some(first) = slots.get(..SLOT_LEN) else {
            tracing::warn!(table = %table, key = %key, "Empty index entry");
            return Ok(None);
        };

        match records.get(first)? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?.value)),
            None => {
                tracing::warn!(table = %table, key = %key, "Index points at a missing record");
                Ok(None)
            }
        }
    }

    fn put(&self, table: &Table, key: &str, value: &str) -> AppResult<()> {
        let (records, index) = self.trees(table)?;
        let fresh_slot = serialize_slot(self.db.generate_id()?);
        let encoded = serde_json::to_vec(&Record::new(key, value))?;

        (&records, &index)
            .transaction(|(tx_records, tx_index)| -> ConflictableTransactionResult<(), ()> {
                let existing = tx_index
                    .get(key)?
                    .and_then(|slots| slots.get(..SLOT_LEN).map(sled::IVec::from));
                let slot = match existing {
                    Some(slot) => slot,
                    None => {
                        tx_index.insert(key, &fresh_slot[..])?;
                        sled::IVec::from(&fresh_slot[..])
                    }
                };
                tx_records.insert(slot, encoded.clone())?;
                Ok(())
            })
            .map_err(map_transaction_error)?;

        Ok(())
    }

    fn append(&self, table: &Table, key: &str, value: &str) -> AppResult<()> {
        let (records, index) = self.trees(table)?;
        let fresh_slot = serialize_slot(self.db.generate_id()?);
        let encoded = serde_json::to_vec(&Record::new(key, value))?;

        (&records, &index)
            .transaction(|(tx_records, tx_index)| -> ConflictableTransactionResult<(), ()> {
                let mut slots = tx_index
                    .get(key)?
                    .map(|slots| slots.to_vec())
                    .unwrap_or_default();
                slots.extend_from_slice(&fresh_slot);
                tx_index.insert(key, slots)?;
                tx_records.insert(&fresh_slot[..], encoded.clone())?;
                Ok(())
            })
            .map_err(map_transaction_error)?;

        Ok(())
    }

    fn insert_new(&self, table: &Table, key: &str, value: &str) -> AppResult<bool> {
        let (records, index) = self.trees(table)?;
        let fresh_slot = serialize_slot(self.db.generate_id()?);
        let encoded = serde_json::to_vec(&Record::new(key, value))?;

        let inserted = (&records, &index)
            .transaction(
                |(tx_records, tx_index)| -> ConflictableTransactionResult<bool, ()> {
                    if tx_index.get(key)?.is_some() {
                        return Ok(false);
                    }
                    tx_index.insert(key, &fresh_slot[..])?;
                    tx_records.insert(&fresh_slot[..], encoded.clone())?;
                    Ok(true)
                },
            )
            .map_err(map_transaction_error)?;

        Ok(inserted)
    }

    fn delete(&self, table: &Table, key: &str) -> AppResult<bool> {
        let (records, index) = self.trees(table)?;

        let removed = (&records, &index)
            .transaction(|(tx_records, tx_index)| remove_all(tx_records, tx_index, key))
            .map_err(map_transaction_error)?;

        Ok(removed)
    }

    fn toggle(&self, table: &Table, key: &str, value: &str) -> AppResult<bool> {
        let (records, index) = self.trees(table)?;
        let fresh_slot = serialize_slot(self.db.generate_id()?);
        let encoded = serde_json::to_vec(&Record::new(key, value))?;

        let added = (&records, &index)
            .transaction(
                |(tx_records, tx_index)| -> ConflictableTransactionResult<bool, ()> {
                    if remove_all(tx_records, tx_index, key)? {
                        return Ok(false);
                    }
                    tx_index.insert(key, &fresh_slot[..])?;
                    tx_records.insert(&fresh_slot[..], encoded.clone())?;
                    Ok(true)
                },
            )
            .map_err(map_transaction_error)?;

        Ok(added)
    }

    fn scan(&self, table: &Table) -> AppResult<Vec<Record>> {
        let (records, _) = self.trees(table)?;

        let mut scanned = Vec::new();
        for item in records.iter().values() {
            let bytes = item?;
            match Self::decode(&bytes) {
                Ok(record) => scanned.push(record),
                Err(e) => tracing::warn!(
                    table = %table,
                    error = %e,
                    "Skipping undecodable record"
                ),
            }
        }

        Ok(scanned)
    }

    fn name(&self) -> &'static str {
        "sled"
    }
}
