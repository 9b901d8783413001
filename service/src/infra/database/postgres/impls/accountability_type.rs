//! [`AccountabilityType`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{accountability_type, AccountabilityType, Revision, Version},
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

impl FromColumns for AccountabilityType {
    #[expect(unsafe_code, reason = "stored names are valid")]
    fn from_columns(row: &impl Columns) -> Result<Self, row::Error> {
        Ok(Self {
            id: row.identity("id")?.into(),
            name: row.string("name")?.map(|n| unsafe {
                accountability_type::Name::new_unchecked(n)
            }),
            version: row.int("version")?.map(Into::into),
        })
    }
}

/// Builds a [`WhereClause`] out of the provided
/// [`read::accountability_type::Filter`].
fn where_clause(filter: &read::accountability_type::Filter) -> WhereClause {
    WhereClause::default()
        .any_of("id", filter.ids.as_deref())
        .similar_to("name", filter.name.as_deref())
}

impl<C>
    Database<
        Select<
            By<Vec<AccountabilityType>, read::accountability_type::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<AccountabilityType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<AccountabilityType>, read::accountability_type::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!(
            "SELECT id, name, version \
             FROM accountability_type{clause}",
        );
        log::debug!("selecting accountability types: {sql}");

        let params = clause.params();
        self.query(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(AccountabilityType::from_columns)
            .collect::<Result<_, _>>()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C>
    Database<
        Select<By<Option<AccountabilityType>, accountability_type::Id>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<AccountabilityType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<AccountabilityType>, accountability_type::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: accountability_type::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, version \
            FROM accountability_type \
            WHERE id = $1::INT8";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(AccountabilityType::from_columns)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Insert<accountability_type::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = accountability_type::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<accountability_type::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let accountability_type::Draft { name } = draft;

        const SQL: &str = "\
            INSERT INTO accountability_type (name) \
            VALUES ($1::VARCHAR) \
            RETURNING id";
        let row = self
            .query_opt(SQL, &[&name])
            .await
            .map_err(tracerr::wrap!())?;
        row::returned_id(row.as_ref())
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C>
    Database<
        Update<
            Revision<accountability_type::Id, accountability_type::Draft>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(revision): Update<
            Revision<accountability_type::Id, accountability_type::Draft>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let Revision {
            id,
            version,
            draft: accountability_type::Draft { name },
        } = revision;

        const SQL: &str = "\
            UPDATE accountability_type \
            SET name = $3::VARCHAR, \
                version = version + 1 \
            WHERE id = $1::INT8 \
              AND version = $2::INT4";
        self.exec(SQL, &[&id, &version, &name])
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<AccountabilityType, accountability_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Version>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<AccountabilityType, accountability_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT version \
            FROM accountability_type \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        lock_version(self, SQL, by.into_inner().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<AccountabilityType, accountability_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<AccountabilityType, accountability_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: accountability_type::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM accountability_type \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&id]).await.map_err(tracerr::wrap!())
    }
}

impl<C>
    Database<
        Delete<By<AccountabilityType, read::accountability_type::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<
            By<AccountabilityType, read::accountability_type::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!("DELETE FROM accountability_type{clause}");
        log::debug!("deleting accountability types: {sql}");

        let params = clause.params();
        self.exec(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{accountability_type, AccountabilityType},
        infra::postgres::{
            row::mock::{Row, Value},
            FromColumns as _,
        },
        read,
    };

    use super::where_clause;

    #[test]
    fn maps_row() {
        let row = Row::default()
            .with("id", Value::Long(4))
            .with("name", Value::String("Supervision".into()))
            .with("version", Value::Int(1));

        assert_eq!(
            AccountabilityType::from_columns(&row),
            Ok(AccountabilityType {
                id: 4.into(),
                name: accountability_type::Name::new("Supervision"),
                version: Some(1.into()),
            }),
        );
    }

    #[test]
    fn filters_by_words_of_name() {
        let filter = read::accountability_type::Filter {
            ids: None,
            name: Some("report supervision".into()),
        };
        let clause = where_clause(&filter);

        assert_eq!(
            clause.to_string(),
            " WHERE LOWER(name) SIMILAR TO LOWER($1::VARCHAR)",
        );
        assert_eq!(clause.params().len(), 1);
    }
}
