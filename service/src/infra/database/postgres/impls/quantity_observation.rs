//! [`QuantityObservation`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        quantity_observation as observation, QuantityObservation, Revision,
        Version,
    },
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

/// Columns of the `quantity_observation` table.
const COLUMNS: &str = "\
    id, task_id, party_id, database_id, \
    reporting_table_id, reporting_variable_id, \
    year, amount, unit_id, version";

impl FromColumns for QuantityObservation {
    fn from_columns(row: &impl Columns) -> Result<Self, row::Error> {
        Ok(Self {
            id: row.identity("id")?.into(),
            task_id: row.long("task_id")?.map(Into::into),
            party_id: row.long("party_id")?.map(Into::into),
            database_id: row.long("database_id")?.map(Into::into),
            reporting_table_id: row.long("reporting_table_id")?.map(Into::into),
            reporting_variable_id: row
                .long("reporting_variable_id")?
                .map(Into::into),
            year: row.int("year")?,
            amount: row.double("amount")?,
            unit_id: row.long("unit_id")?.map(Into::into),
            version: row.int("version")?.map(Into::into),
        })
    }
}

/// Builds a [`WhereClause`] out of the provided
/// [`read::quantity_observation::Filter`].
fn where_clause(filter: &read::quantity_observation::Filter) -> WhereClause {
    WhereClause::default()
        .any_of("id", filter.ids.as_deref())
        .eq("task_id", filter.task_id)
        .eq("party_id", filter.party_id)
        .eq("database_id", filter.database_id)
        .eq("reporting_table_id", filter.reporting_table_id)
        .eq("reporting_variable_id", filter.reporting_variable_id)
        .eq("year", filter.year)
        .eq("unit_id", filter.unit_id)
}

impl<C>
    Database<
        Select<
            By<Vec<QuantityObservation>, read::quantity_observation::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<QuantityObservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<QuantityObservation>, read::quantity_observation::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql =
            format!("SELECT {COLUMNS} FROM quantity_observation{clause}");
        log::debug!("selecting quantity observations: {sql}");

        let params = clause.params();
        self.query(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(QuantityObservation::from_columns)
            .collect::<Result<_, _>>()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Select<By<Option<QuantityObservation>, observation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<QuantityObservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<QuantityObservation>, observation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: observation::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} FROM quantity_observation WHERE id = $1::INT8",
        );
        self.query_opt(sql.as_str(), &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(QuantityObservation::from_columns)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Insert<observation::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = observation::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<observation::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let observation::Draft {
            task_id,
            party_id,
            database_id,
            reporting_table_id,
            reporting_variable_id,
            year,
            amount,
            unit_id,
        } = draft;

        const SQL: &str = "\
            INSERT INTO quantity_observation (\
                task_id, party_id, database_id, \
                reporting_table_id, reporting_variable_id, \
                year, amount, unit_id\
            ) \
            VALUES (\
                $1::INT8, $2::INT8, $3::INT8, \
                $4::INT8, $5::INT8, \
                $6::INT4, $7::FLOAT8, $8::INT8\
            ) \
            RETURNING id";
        let row = self
            .query_opt(
                SQL,
                &[
                    &task_id,
                    &party_id,
                    &database_id,
                    &reporting_table_id,
                    &reporting_variable_id,
                    &year,
                    &amount,
                    &unit_id,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?;
        row::returned_id(row.as_ref())
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Update<Revision<observation::Id, observation::Draft>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(revision): Update<Revision<observation::Id, observation::Draft>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Revision {
            id,
            version,
            draft:
                observation::Draft {
                    task_id,
                    party_id,
                    database_id,
                    reporting_table_id,
                    reporting_variable_id,
                    year,
                    amount,
                    unit_id,
                },
        } = revision;

        const SQL: &str = "\
            UPDATE quantity_observation \
            SET task_id = $3::INT8, \
                party_id = $4::INT8, \
                database_id = $5::INT8, \
                reporting_table_id = $6::INT8, \
                reporting_variable_id = $7::INT8, \
                year = $8::INT4, \
                amount = $9::FLOAT8, \
                unit_id = $10::INT8, \
                version = version + 1 \
            WHERE id = $1::INT8 \
              AND version = $2::INT4";
        self.exec(
            SQL,
            &[
                &id,
                &version,
                &task_id,
                &party_id,
                &database_id,
                &reporting_table_id,
                &reporting_variable_id,
                &year,
                &amount,
                &unit_id,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<QuantityObservation, observation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Version>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<QuantityObservation, observation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT version \
            FROM quantity_observation \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        lock_version(self, SQL, by.into_inner().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<QuantityObservation, observation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<QuantityObservation, observation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: observation::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM quantity_observation \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&id]).await.map_err(tracerr::wrap!())
    }
}

impl<C>
    Database<
        Delete<By<QuantityObservation, read::quantity_observation::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<
            By<QuantityObservation, read::quantity_observation::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!("DELETE FROM quantity_observation{clause}");
        log::debug!("deleting quantity observations: {sql}");

        let params = clause.params();
        self.exec(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())
    }
}
