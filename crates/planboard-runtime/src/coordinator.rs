use crate::error::{Error, Result};
use crate::flight::FlightTable;
use crate::notify::{NoticeLevel, Notifier};
use crate::view::{ViewInstance, ViewToken};
use planboard_client::{RecordClient, RemoteError};
use planboard_engine::{CollectionCache, FieldErrors};
use planboard_types::{Record, RecordFields};
use std::sync::Arc;

/// One remote write, in terms of the entity's mutable fields.
#[derive(Debug, Clone)]
pub enum Mutation<R: Record> {
    Create(R::Fields),
    Update { id: R::Id, fields: R::Fields },
    Delete(R::Id),
}

impl<R: Record> Mutation<R> {
    /// Single-flight key: one slot per existing identity, one shared
    /// slot per table for creates.
    fn flight_key(&self) -> String {
        match self {
            Mutation::Create(_) => format!("{}/new", R::ENTITY),
            Mutation::Update { id, .. } => format!("{}/{}", R::ENTITY, id),
            Mutation::Delete(id) => format!("{}/{}", R::ENTITY, id),
        }
    }
}

/// What a confirmed write did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<R: Record> {
    Created(R),
    Updated(R),
    Deleted(R::Id),
}

/// Outcome of a submission that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R: Record> {
    /// The store confirmed the write and the cache reflects it
    Applied(Applied<R>),
    /// The store rejected the write field-by-field; nothing changed
    Rejected(FieldErrors),
    /// The response landed after the view moved on; discarded
    Stale,
}

/// Drives one entity's writes through the confirm-then-apply pipeline.
///
/// Per submission: claim the single-flight slot, scrub free text,
/// normalize timestamps, call the store, check the view token, apply
/// the canonical response to the cache, signal the notice. The cache
/// is only ever touched with a record the store actually returned, so
/// no failure can leave it out of step.
pub struct MutationCoordinator<R: Record> {
    client: Arc<dyn RecordClient<R>>,
    notifier: Arc<dyn Notifier>,
    view: ViewInstance,
    flights: FlightTable,
}

impl<R: Record> MutationCoordinator<R> {
    pub fn new(
        client: Arc<dyn RecordClient<R>>,
        notifier: Arc<dyn Notifier>,
        view: ViewInstance,
        flights: FlightTable,
    ) -> Self {
        Self {
            client,
            notifier,
            view,
            flights,
        }
    }

    pub fn view(&self) -> &ViewInstance {
        &self.view
    }

    /// The table flow: confirmed writes apply to `cache` before the
    /// success notice fires.
    pub async fn submit(
        &self,
        token: ViewToken,
        cache: &mut CollectionCache<R>,
        mutation: Mutation<R>,
    ) -> Result<SubmitOutcome<R>> {
        self.execute(token, mutation, Some(cache), true).await
    }

    /// The standalone-form flow: same pipeline, no table cache to
    /// apply to, success notices left to the caller's register.
    pub async fn dispatch(
        &self,
        token: ViewToken,
        mutation: Mutation<R>,
    ) -> Result<SubmitOutcome<R>> {
        self.execute(token, mutation, None, false).await
    }

    async fn execute(
        &self,
        token: ViewToken,
        mutation: Mutation<R>,
        mut cache: Option<&mut CollectionCache<R>>,
        announce: bool,
    ) -> Result<SubmitOutcome<R>> {
        let _guard = self.flights.acquire(&mutation.flight_key())?;

        let confirmed = match mutation {
            Mutation::Create(mut fields) => {
                fields.sanitize();
                fields.normalize_timestamps();
                self.client.create(&fields).await.map(Applied::Created)
            }
            Mutation::Update { id, mut fields } => {
                fields.sanitize();
                fields.normalize_timestamps();
                self.client.update(id, &fields).await.map(Applied::Updated)
            }
            Mutation::Delete(id) => match self.client.delete(id).await {
                Ok(()) => Ok(Applied::Deleted(id)),
                // Already gone remotely: the intent holds, so the
                // flow continues as a confirmed delete.
                Err(err) if err.is_not_found() => Ok(Applied::Deleted(id)),
                Err(err) => Err(err),
            },
        };

        let applied = match confirmed {
            Ok(applied) => applied,
            Err(RemoteError::Validation(errors)) => {
                let field_errors = FieldErrors::from_validation(&errors);
                if let Some(notice) = field_errors.notice() {
                    self.notifier.notify(NoticeLevel::Error, notice);
                }
                return Ok(SubmitOutcome::Rejected(field_errors));
            }
            Err(other) => return Err(Error::Remote(other)),
        };

        if !self.view.is_current(token) {
            return Ok(SubmitOutcome::Stale);
        }

        if let Some(cache) = cache.as_deref_mut() {
            match &applied {
                Applied::Created(record) => cache.apply_create(record.clone())?,
                Applied::Updated(record) => cache.apply_update(record.clone())?,
                Applied::Deleted(id) => {
                    // The entry may already be absent; a delete only
                    // has to end with the record gone.
                    if cache.contains(*id) {
                        cache.apply_delete(*id)?;
                    }
                }
            }
        }

        if announce {
            let message = match &applied {
                Applied::Created(_) => format!("{} created successfully", R::LABEL),
                Applied::Updated(_) => format!("{} updated successfully", R::LABEL),
                Applied::Deleted(_) => format!("{} deleted successfully", R::LABEL),
            };
            self.notifier.notify(NoticeLevel::Success, &message);
        }

        Ok(SubmitOutcome::Applied(applied))
    }
}
