//! HTTP handlers of [`Dto`] records.
//!
//! Every handler is generic over the [`Dto`] it serves, and is routed with a
//! concrete one.

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    Extension, Json,
};
use common::{operations::By, params, FromParams as _, Params};
use service::{
    command::{
        create_record, update_record, CreateRecord, DeleteRecords,
        UpdateRecord,
    },
    domain::{Entity, Revision},
    infra::database,
    query::DatabaseQuery,
    Command,
};
use tracerr::Traced;

use crate::{AsError, Error, Service};

use super::{Dto, RecordError};

/// ID of the [`Entity`] represented by the `D`TO.
type IdOf<D> = <<D as Dto>::Entity as Entity>::Id;

/// Parses the ID of the requested record out of its path segment.
fn parse_id<D: Dto>(id: &str) -> Result<IdOf<D>, Error> {
    params::parse("id", id).map_err(AsError::into_error)
}

/// Lists the records matching the query string filters.
#[tracing::instrument(skip_all, fields(resource = D::NAME))]
pub async fn list<D: Dto>(
    Extension(service): Extension<Service>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<D>>, Error>
where
    Service: service::Query<
        DatabaseQuery<By<Vec<D::Entity>, D::Filter>>,
        Ok = Vec<D::Entity>,
        Err = Traced<database::Error>,
    >,
{
    let params = params.into_iter().collect::<Params>();
    let filter =
        D::Filter::from_params(&params).map_err(AsError::into_error)?;

    let mut records = service
        .execute(DatabaseQuery::<By<Vec<D::Entity>, D::Filter>>::by(filter))
        .await
        .map_err(AsError::into_error)?;
    records.sort_by(<D::Entity as Entity>::cmp_by_id);

    Ok(Json(records.into_iter().map(D::from).collect()))
}

/// Returns the record with the requested ID.
#[tracing::instrument(skip_all, fields(resource = D::NAME, id = %id))]
pub async fn get<D: Dto>(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<D>, Error>
where
    Service: service::Query<
        DatabaseQuery<By<Option<D::Entity>, IdOf<D>>>,
        Ok = Option<D::Entity>,
        Err = Traced<database::Error>,
    >,
{
    let id = parse_id::<D>(&id)?;

    service
        .execute(DatabaseQuery::<By<Option<D::Entity>, _>>::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|r| Json(D::from(r)))
        .ok_or_else(|| RecordError::NotExists.into())
}

/// Creates a new record out of the request body.
#[tracing::instrument(skip_all, fields(resource = D::NAME))]
pub async fn create<D: Dto>(
    Extension(service): Extension<Service>,
    body: Result<Json<D>, JsonRejection>,
) -> Result<(StatusCode, Json<D>), Error>
where
    Service: Command<
        CreateRecord<D::Entity>,
        Ok = D::Entity,
        Err = Traced<create_record::ExecutionError<IdOf<D>>>,
    >,
{
    let Json(dto) = body.map_err(AsError::into_error)?;
    let draft = dto.into_draft()?;

    let record = service
        .execute(CreateRecord::<D::Entity>::new(draft))
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(D::from(record))))
}

/// Replaces the record with the requested ID with the request body.
///
/// The body must carry the `version` of the record it's based on.
#[tracing::instrument(skip_all, fields(resource = D::NAME, id = %id))]
pub async fn update<D: Dto>(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
    body: Result<Json<D>, JsonRejection>,
) -> Result<Json<D>, Error>
where
    Service: Command<
        UpdateRecord<D::Entity>,
        Ok = D::Entity,
        Err = Traced<update_record::ExecutionError<IdOf<D>>>,
    >,
{
    let id = parse_id::<D>(&id)?;
    let Json(dto) = body.map_err(AsError::into_error)?;
    let path_id: i64 = id.into();
    if dto.id().is_some_and(|body_id| body_id != path_id) {
        return Err(RecordError::IdMismatch.into());
    }
    let version = dto.version().ok_or(RecordError::VersionRequired)?;
    let draft = dto.into_draft()?;

    let record = service
        .execute(UpdateRecord::<D::Entity>::new(Revision {
            id,
            version: version.into(),
            draft,
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(D::from(record)))
}

/// Deletes the record with the requested ID, if it exists.
#[tracing::instrument(skip_all, fields(resource = D::NAME, id = %id))]
pub async fn delete<D: Dto>(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error>
where
    Service: Command<
        DeleteRecords<By<D::Entity, IdOf<D>>>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
{
    let id = parse_id::<D>(&id)?;

    let deleted = service
        .execute(DeleteRecords::<By<D::Entity, _>>::by(id))
        .await
        .map_err(AsError::into_error)?;
    tracing::debug!("deleted {deleted} record(s)");

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes all the records matching the query string filters.
#[tracing::instrument(skip_all, fields(resource = D::NAME))]
pub async fn delete_filtered<D: Dto>(
    Extension(service): Extension<Service>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<StatusCode, Error>
where
    Service: Command<
        DeleteRecords<By<D::Entity, D::Filter>>,
        Ok = u64,
        Err = Traced<database::Error>,
    >,
{
    let params = params.into_iter().collect::<Params>();
    let filter =
        D::Filter::from_params(&params).map_err(AsError::into_error)?;

    let deleted = service
        .execute(DeleteRecords::<By<D::Entity, D::Filter>>::by(filter))
        .await
        .map_err(AsError::into_error)?;
    tracing::debug!("deleted {deleted} record(s)");

    Ok(StatusCode::NO_CONTENT)
}
