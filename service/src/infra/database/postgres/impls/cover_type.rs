//! [`CoverType`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{cover_type, CoverType, Revision, Version},
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

impl FromColumns for CoverType {
    #[expect(unsafe_code, reason = "stored codes and descriptions are valid")]
    fn from_columns(row: &impl Columns) -> Result<Self, row::Error> {
        Ok(Self {
            id: row.identity("id")?.into(),
            code: row
                .string("code")?
                .map(|c| unsafe { cover_type::Code::new_unchecked(c) }),
            description: row.string("description")?.map(|d| unsafe {
                cover_type::Description::new_unchecked(d)
            }),
            version: row.int("version")?.map(Into::into),
        })
    }
}

/// Builds a [`WhereClause`] out of the provided [`read::cover_type::Filter`].
fn where_clause(filter: &read::cover_type::Filter) -> WhereClause {
    WhereClause::default()
        .any_of("id", filter.ids.as_deref())
        .similar_to("description", filter.description.as_deref())
}

impl<C> Database<Select<By<Vec<CoverType>, read::cover_type::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<CoverType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<CoverType>, read::cover_type::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!(
            "SELECT id, code, description, version \
             FROM cover_type{clause}",
        );
        log::debug!("selecting cover types: {sql}");

        let params = clause.params();
        self.query(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(CoverType::from_columns)
            .collect::<Result<_, _>>()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Select<By<Option<CoverType>, cover_type::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<CoverType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<CoverType>, cover_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: cover_type::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, code, description, version \
            FROM cover_type \
            WHERE id = $1::INT8";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(CoverType::from_columns)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Insert<cover_type::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = cover_type::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<cover_type::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let cover_type::Draft { code, description } = draft;

        const SQL: &str = "\
            INSERT INTO cover_type (code, description) \
            VALUES ($1::VARCHAR, $2::VARCHAR) \
            RETURNING id";
        let row = self
            .query_opt(SQL, &[&code, &description])
            .await
            .map_err(tracerr::wrap!())?;
        row::returned_id(row.as_ref())
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Update<Revision<cover_type::Id, cover_type::Draft>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(revision): Update<Revision<cover_type::Id, cover_type::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Revision {
            id,
            version,
            draft: cover_type::Draft { code, description },
        } = revision;

        const SQL: &str = "\
            UPDATE cover_type \
            SET code = $3::VARCHAR, \
                description = $4::VARCHAR, \
                version = version + 1 \
            WHERE id = $1::INT8 \
              AND version = $2::INT4";
        self.exec(SQL, &[&id, &version, &code, &description])
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<CoverType, cover_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Version>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<CoverType, cover_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT version \
            FROM cover_type \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        lock_version(self, SQL, by.into_inner().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<CoverType, cover_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<CoverType, cover_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: cover_type::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM cover_type \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&id]).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<CoverType, read::cover_type::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<CoverType, read::cover_type::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!("DELETE FROM cover_type{clause}");
        log::debug!("deleting cover types: {sql}");

        let params = clause.params();
        self.exec(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{cover_type, CoverType},
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
            .with("id", Value::Long(2))
            .with("code", Value::String("FL".into()))
            .with("description", Value::String("Forest land".into()))
            .with("version", Value::Int(1));

        assert_eq!(
            CoverType::from_columns(&row),
            Ok(CoverType {
                id: 2.into(),
                code: cover_type::Code::new("FL"),
                description: cover_type::Description::new("Forest land"),
                version: Some(1.into()),
            }),
        );
    }

    #[test]
    fn filters_by_ids_and_description() {
        let filter = read::cover_type::Filter {
            ids: Some(vec![5.into()]),
            description: Some("forest".into()),
        };

        assert_eq!(
            where_clause(&filter).to_string(),
            " WHERE id IN (5) \
               AND LOWER(description) SIMILAR TO LOWER($1::VARCHAR)",
        );
    }
}
