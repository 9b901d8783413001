//! [`Party`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{party, Party, Revision, Version},
    infra::{
        database::{
            self,
            postgres::{row, Columns, Connection, FromColumns, WhereClause},
            Postgres,
        },
        postgres, Database,
    },
    read,
};

use super::lock_version;

impl FromColumns for Party {
    #[expect(unsafe_code, reason = "stored names are valid")]
    fn from_columns(row: &impl Columns) -> Result<Self, row::Error> {
        Ok(Self {
            id: row.identity("id")?.into(),
            type_id: row.long("party_type_id")?.map(Into::into),
            name: row
                .string("name")?
                .map(|n| unsafe { party::Name::new_unchecked(n) }),
            version: row.int("version")?.map(Into::into),
        })
    }
}

/// Builds a [`WhereClause`] out of the provided [`read::party::Filter`].
fn where_clause(filter: &read::party::Filter) -> WhereClause {
    WhereClause::default()
        .any_of("id", filter.ids.as_deref())
        .eq("party_type_id", filter.type_id)
        .similar_to("name", filter.name.as_deref())
}

impl<C> Database<Select<By<Vec<Party>, read::party::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Party>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Party>, read::party::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!(
            "SELECT id, party_type_id, name, version \
             FROM party{clause}",
        );
        log::debug!("selecting parties: {sql}");

        let params = clause.params();
        self.query(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(Party::from_columns)
            .collect::<Result<_, _>>()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Select<By<Option<Party>, party::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Party>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Party>, party::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: party::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, party_type_id, name, version \
            FROM party \
            WHERE id = $1::INT8";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(Party::from_columns)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Insert<party::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = party::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<party::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let party::Draft { type_id, name } = draft;

        const SQL: &str = "\
            INSERT INTO party (party_type_id, name) \
            VALUES ($1::INT8, $2::VARCHAR) \
            RETURNING id";
        let row = self
            .query_opt(SQL, &[&type_id, &name])
            .await
            .map_err(tracerr::wrap!())?;
        row::returned_id(row.as_ref())
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Update<Revision<party::Id, party::Draft>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(revision): Update<Revision<party::Id, party::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Revision {
            id,
            version,
            draft: party::Draft { type_id, name },
        } = revision;

        const SQL: &str = "\
            UPDATE party \
            SET party_type_id = $3::INT8, \
                name = $4::VARCHAR, \
                version = version + 1 \
            WHERE id = $1::INT8 \
              AND version = $2::INT4";
        self.exec(SQL, &[&id, &version, &type_id, &name])
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<Party, party::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Version>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Party, party::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: party::Id = by.into_inner();

        const SQL: &str = "\
            SELECT version \
            FROM party \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        lock_version(self, SQL, id.into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Party, party::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Party, party::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: party::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM party \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&id]).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Party, read::party::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Party, read::party::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!("DELETE FROM party{clause}");
        log::debug!("deleting parties: {sql}");

        let params = clause.params();
        self.exec(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())
    }
}
