//! The provisioning sequence: ensure collections, then the fixed set of
//! indexes, in order, each step awaited to completion before the next.

use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use tracing::{info, instrument};

use crate::db::{create_index, CreateIndexError};
use crate::models::{TASKS_COLLECTION, USERS_COLLECTION};

#[derive(thiserror::Error, Debug)]
pub enum ProvisionError {
    #[error("failed to ensure collection exists")]
    EnsureCollectionError(#[source] mongodb::error::Error),
    #[error(transparent)]
    CreateIndexError(#[from] CreateIndexError),
    #[error("failed to list indexes")]
    ListIndexesError(#[source] mongodb::error::Error),
}

/// One index this tool is responsible for. Direction in `keys` follows
/// the driver convention: `1` ascending, `-1` descending.
pub struct IndexSpec {
    pub collection: &'static str,
    pub keys: Document,
    pub unique: bool,
}

/// The indexes the application queries against: unique email lookup for
/// users, filter/sort fields for tasks (newest-first on `created_at`).
pub fn index_plan() -> Vec<IndexSpec> {
    vec![
        IndexSpec {
            collection: USERS_COLLECTION,
            keys: doc! { "email": 1 },
            unique: true,
        },
        IndexSpec {
            collection: TASKS_COLLECTION,
            keys: doc! { "status": 1 },
            unique: false,
        },
        IndexSpec {
            collection: TASKS_COLLECTION,
            keys: doc! { "priority": 1 },
            unique: false,
        },
        IndexSpec {
            collection: TASKS_COLLECTION,
            keys: doc! { "due_date": 1 },
            unique: false,
        },
        IndexSpec {
            collection: TASKS_COLLECTION,
            keys: doc! { "created_at": -1 },
            unique: false,
        },
    ]
}

/// Create the collection only when it is absent, so re-running against
/// an already-provisioned database is a logged no-op rather than a
/// NamespaceExists error. Returns whether a collection was created.
#[instrument(skip(db), fields(database = db.name()), err)]
pub async fn ensure_collection(db: &Database, name: &str) -> Result<bool, ProvisionError> {
    let existing = db
        .list_collection_names()
        .await
        .map_err(ProvisionError::EnsureCollectionError)?;

    if existing.iter().any(|collection| collection == name) {
        info!("collection {} already exists", name);
        return Ok(false);
    }

    db.create_collection(name)
        .await
        .map_err(ProvisionError::EnsureCollectionError)?;
    info!("created collection: {}", name);
    Ok(true)
}

/// Bring the database to the expected shape. The first failure aborts
/// the remaining steps; already-applied steps are not rolled back.
#[instrument(skip(db), fields(database = db.name()), err)]
pub async fn run(db: &Database) -> Result<(), ProvisionError> {
    ensure_collection(db, USERS_COLLECTION).await?;
    ensure_collection(db, TASKS_COLLECTION).await?;

    for spec in index_plan() {
        let collection: Collection<Document> = db.collection(spec.collection);
        let index_name = create_index(&collection, spec.keys, spec.unique).await?;
        if spec.unique {
            info!("created index {} on {} (unique)", index_name, spec.collection);
        } else {
            info!("created index {} on {}", index_name, spec.collection);
        }
    }

    for collection_name in [USERS_COLLECTION, TASKS_COLLECTION] {
        let index_names = db
            .collection::<Document>(collection_name)
            .list_index_names()
            .await
            .map_err(ProvisionError::ListIndexesError)?;
        info!("indexes on {}: {}", collection_name, index_names.join(", "));
    }

    info!("collections and indexes setup complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_plan_covers_both_collections_in_order() {
        let plan = index_plan();
        assert_eq!(plan.len(), 5);

        // users first, then the four task indexes
        assert_eq!(plan[0].collection, USERS_COLLECTION);
        for spec in &plan[1..] {
            assert_eq!(spec.collection, TASKS_COLLECTION);
        }
    }

    #[test]
    fn only_the_email_index_is_unique() {
        let plan = index_plan();
        let unique: Vec<_> = plan.iter().filter(|spec| spec.unique).collect();
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].collection, USERS_COLLECTION);
        assert_eq!(unique[0].keys, doc! { "email": 1 });
    }

    #[test]
    fn task_indexes_ascend_except_created_at() {
        let plan = index_plan();
        assert_eq!(plan[1].keys, doc! { "status": 1 });
        assert_eq!(plan[2].keys, doc! { "priority": 1 });
        assert_eq!(plan[3].keys, doc! { "due_date": 1 });
        assert_eq!(plan[4].keys, doc! { "created_at": -1 });
    }
}
