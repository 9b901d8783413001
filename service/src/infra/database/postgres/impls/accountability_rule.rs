//! [`AccountabilityRule`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{accountability_rule, AccountabilityRule, Revision, Version},
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

impl FromColumns for AccountabilityRule {
    fn from_columns(row: &impl Columns) -> Result<Self, row::Error> {
        Ok(Self {
            id: row.identity("id")?.into(),
            accountability_type_id: row
                .long("accountability_type_id")?
                .map(Into::into),
            parent_party_type_id: row
                .long("parent_party_type_id")?
                .map(Into::into),
            subsidiary_party_type_id: row
                .long("subsidiary_party_type_id")?
                .map(Into::into),
            version: row.int("version")?.map(Into::into),
        })
    }
}

/// Builds a [`WhereClause`] out of the provided
/// [`read::accountability_rule::Filter`].
fn where_clause(filter: &read::accountability_rule::Filter) -> WhereClause {
    WhereClause::default()
        .any_of("id", filter.ids.as_deref())
        .eq("accountability_type_id", filter.accountability_type_id)
        .eq("parent_party_type_id", filter.parent_party_type_id)
        .eq("subsidiary_party_type_id", filter.subsidiary_party_type_id)
}

impl<C>
    Database<
        Select<
            By<Vec<AccountabilityRule>, read::accountability_rule::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<AccountabilityRule>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<AccountabilityRule>, read::accountability_rule::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!(
            "SELECT id, accountability_type_id, \
                    parent_party_type_id, subsidiary_party_type_id, \
                    version \
             FROM accountability_rule{clause}",
        );
        log::debug!("selecting accountability rules: {sql}");

        let params = clause.params();
        self.query(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(AccountabilityRule::from_columns)
            .collect::<Result<_, _>>()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C>
    Database<
        Select<By<Option<AccountabilityRule>, accountability_rule::Id>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<AccountabilityRule>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<AccountabilityRule>, accountability_rule::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: accountability_rule::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, accountability_type_id, \
                   parent_party_type_id, subsidiary_party_type_id, \
                   version \
            FROM accountability_rule \
            WHERE id = $1::INT8";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(AccountabilityRule::from_columns)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Insert<accountability_rule::Draft>> for Postgres<C>
where
    C: Connection,
{
    type Ok = accountability_rule::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<accountability_rule::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let accountability_rule::Draft {
            accountability_type_id,
            parent_party_type_id,
            subsidiary_party_type_id,
        } = draft;

        const SQL: &str = "\
            INSERT INTO accountability_rule (\
                accountability_type_id, \
                parent_party_type_id, subsidiary_party_type_id\
            ) \
            VALUES ($1::INT8, $2::INT8, $3::INT8) \
            RETURNING id";
        let row = self
            .query_opt(
                SQL,
                &[
                    &accountability_type_id,
                    &parent_party_type_id,
                    &subsidiary_party_type_id,
                ],
            )
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
            Revision<accountability_rule::Id, accountability_rule::Draft>,
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
            Revision<accountability_rule::Id, accountability_rule::Draft>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let Revision {
            id,
            version,
            draft:
                accountability_rule::Draft {
                    accountability_type_id,
                    parent_party_type_id,
                    subsidiary_party_type_id,
                },
        } = revision;

        const SQL: &str = "\
            UPDATE accountability_rule \
            SET accountability_type_id = $3::INT8, \
                parent_party_type_id = $4::INT8, \
                subsidiary_party_type_id = $5::INT8, \
                version = version + 1 \
            WHERE id = $1::INT8 \
              AND version = $2::INT4";
        self.exec(
            SQL,
            &[
                &id,
                &version,
                &accountability_type_id,
                &parent_party_type_id,
                &subsidiary_party_type_id,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<AccountabilityRule, accountability_rule::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Version>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<AccountabilityRule, accountability_rule::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT version \
            FROM accountability_rule \
            WHERE id = $1::INT8 \
            FOR UPDATE";
        lock_version(self, SQL, by.into_inner().into())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<AccountabilityRule, accountability_rule::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<AccountabilityRule, accountability_rule::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: accountability_rule::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM accountability_rule \
            WHERE id = $1::INT8";
        self.exec(SQL, &[&id]).await.map_err(tracerr::wrap!())
    }
}

impl<C>
    Database<
        Delete<By<AccountabilityRule, read::accountability_rule::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<
            By<AccountabilityRule, read::accountability_rule::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let clause = where_clause(&by.into_inner());
        let sql = format!("DELETE FROM accountability_rule{clause}");
        log::debug!("deleting accountability rules: {sql}");

        let params = clause.params();
        self.exec(sql.as_str(), &params)
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::AccountabilityRule,
        infra::postgres::{
            row::{
                mock::{Row, Value},
                Error,
            },
            FromColumns as _,
        },
        read,
    };

    use super::where_clause;

    #[test]
    fn maps_row_regardless_of_extra_columns() {
        let row = Row::default()
            .with("id", Value::Long(10))
            .with("accountability_type_id", Value::Long(5))
            .with("parent_party_type_id", Value::Long(1))
            .with("subsidiary_party_type_id", Value::Null)
            .with("comment", Value::String("ignored".into()))
            .with("version", Value::Int(2));

        assert_eq!(
            AccountabilityRule::from_columns(&row),
            Ok(AccountabilityRule {
                id: 10.into(),
                accountability_type_id: Some(5.into()),
                parent_party_type_id: Some(1.into()),
                subsidiary_party_type_id: None,
                version: Some(2.into()),
            }),
        );
    }

    #[test]
    fn fails_on_mistyped_column() {
        let row = Row::default()
            .with("id", Value::Long(10))
            .with("accountability_type_id", Value::String("5".into()));

        assert!(matches!(
            AccountabilityRule::from_columns(&row),
            Err(Error::Column { name, .. }) if name == "accountability_type_id",
        ));
    }

    #[test]
    fn filters_in_declared_order() {
        let filter = read::accountability_rule::Filter {
            ids: Some(vec![2.into(), 1.into()]),
            accountability_type_id: Some(5.into()),
            parent_party_type_id: None,
            subsidiary_party_type_id: Some(3.into()),
        };

        assert_eq!(
            where_clause(&filter).to_string(),
            " WHERE id IN (1,2) \
               AND accountability_type_id = 5 \
               AND subsidiary_party_type_id = 3",
        );
    }

    #[test]
    fn single_filter() {
        let filter = read::accountability_rule::Filter {
            accountability_type_id: Some(5.into()),
            ..read::accountability_rule::Filter::default()
        };

        assert_eq!(
            where_clause(&filter).to_string(),
            " WHERE accountability_type_id = 5",
        );
    }
}
