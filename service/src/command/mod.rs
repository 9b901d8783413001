//! [`Command`] definition.

pub mod create_record;
pub mod delete_records;
pub mod update_record;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_record::CreateRecord, delete_records::DeleteRecords,
    update_record::UpdateRecord,
};

#[cfg(test)]
mod memory {
    //! In-memory [`Database`] double storing [`Party`] records.

    use std::{
        collections::BTreeMap,
        sync::{Arc, Mutex},
    };

    use common::operations::{
        By, Commit, Delete, Insert, Lock, Select, Transact, Update,
    };
    use tracerr::Traced;

    use crate::{
        domain::{party, Party, Revision, Version},
        infra::{database, Database},
        read,
    };

    /// In-memory [`Database`] of [`Party`] records.
    ///
    /// Transactions share the same storage and are never rolled back.
    #[derive(Clone, Debug, Default)]
    pub(super) struct Memory {
        state: Arc<Mutex<State>>,
    }

    #[derive(Debug, Default)]
    struct State {
        last_id: i64,
        rows: BTreeMap<party::Id, Party>,
        vanishing: bool,
    }

    impl Memory {
        /// Makes every inserted record disappear right after insertion.
        pub(super) fn vanishing(self) -> Self {
            self.state.lock().unwrap().vanishing = true;
            self
        }

        /// Overwrites the [`Version`] of the stored [`Party`] with the
        /// provided `id`.
        pub(super) fn set_version(&self, id: party::Id, version: i32) {
            self.state
                .lock()
                .unwrap()
                .rows
                .get_mut(&id)
                .unwrap()
                .version = Some(version.into());
        }

        fn matches(filter: &read::party::Filter, party: &Party) -> bool {
            filter.ids.as_ref().map_or(true, |ids| ids.contains(&party.id))
                && filter.type_id.map_or(true, |t| party.type_id == Some(t))
                && filter.name.as_ref().map_or(true, |name| {
                    party.name.as_ref().is_some_and(|n| {
                        let n = n.to_string().to_lowercase();
                        name.split_whitespace()
                            .any(|w| n.contains(&w.to_lowercase()))
                    })
                })
        }
    }

    impl Database<Insert<party::Draft>> for Memory {
        type Ok = party::Id;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Insert(draft): Insert<party::Draft>,
        ) -> Result<Self::Ok, Self::Err> {
            let mut state = self.state.lock().unwrap();
            state.last_id += 1;
            let id = party::Id::from(state.last_id);
            if !state.vanishing {
                drop(state.rows.insert(
                    id,
                    Party {
                        id,
                        type_id: draft.type_id,
                        name: draft.name,
                        version: Some(1.into()),
                    },
                ));
            }
            Ok(id)
        }
    }

    impl Database<Select<By<Option<Party>, party::Id>>> for Memory {
        type Ok = Option<Party>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<Party>, party::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.state.lock().unwrap().rows.get(&by.into_inner()).cloned())
        }
    }

    impl Database<Select<By<Vec<Party>, read::party::Filter>>> for Memory {
        type Ok = Vec<Party>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Vec<Party>, read::party::Filter>>,
        ) -> Result<Self::Ok, Self::Err> {
            let filter = by.into_inner();
            Ok(self
                .state
                .lock()
                .unwrap()
                .rows
                .values()
                .filter(|p| Self::matches(&filter, p))
                .cloned()
                .collect())
        }
    }

    impl Database<Transact> for Memory {
        type Ok = Self;
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
            Ok(self.clone())
        }
    }

    impl Database<Commit> for Memory {
        type Ok = ();
        type Err = Traced<database::Error>;

        async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
            Ok(())
        }
    }

    impl Database<Lock<By<Party, party::Id>>> for Memory {
        type Ok = Option<Version>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Lock(by): Lock<By<Party, party::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .rows
                .get(&by.into_inner())
                .and_then(|p| p.version))
        }
    }

    impl Database<Update<Revision<party::Id, party::Draft>>> for Memory {
        type Ok = u64;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Update(rev): Update<Revision<party::Id, party::Draft>>,
        ) -> Result<Self::Ok, Self::Err> {
            let mut state = self.state.lock().unwrap();
            let Some(party) = state
                .rows
                .get_mut(&rev.id)
                .filter(|p| p.version == Some(rev.version))
            else {
                return Ok(0);
            };
            party.type_id = rev.draft.type_id;
            party.name = rev.draft.name;
            party.version = Some((i32::from(rev.version) + 1).into());
            Ok(1)
        }
    }

    impl Database<Delete<By<Party, party::Id>>> for Memory {
        type Ok = u64;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(by): Delete<By<Party, party::Id>>,
        ) -> Result<Self::Ok, Self::Err> {
            let removed =
                self.state.lock().unwrap().rows.remove(&by.into_inner());
            Ok(removed.map_or(0, |_| 1))
        }
    }

    impl Database<Delete<By<Party, read::party::Filter>>> for Memory {
        type Ok = u64;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            Delete(by): Delete<By<Party, read::party::Filter>>,
        ) -> Result<Self::Ok, Self::Err> {
            let filter = by.into_inner();
            let mut state = self.state.lock().unwrap();
            let before = state.rows.len();
            state.rows.retain(|_, p| !Self::matches(&filter, p));
            Ok((before - state.rows.len()) as u64)
        }
    }
}
