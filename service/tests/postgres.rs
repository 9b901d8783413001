//! Tests of the Postgres `Database` against a real PostgreSQL server.

use std::time::Duration;

use common::operations::By;
use service::{
    command::{update_record, CreateRecord, DeleteRecords, UpdateRecord},
    domain::{
        accountability_rule, party, quantity_observation, AccountabilityRule,
        Party, QuantityObservation, Revision,
    },
    infra::{
        postgres::{self, Config},
        Postgres,
    },
    query, read, Command as _, Service,
};
use testcontainers::{
    core::WaitFor, runners::AsyncRunner as _, ContainerAsync, GenericImage,
};

postgres::embed_migrations!("../migrations");

/// [`Service`] backed by a disposable PostgreSQL container.
struct Harness {
    /// Container running PostgreSQL, stopped once dropped.
    _container: ContainerAsync<GenericImage>,

    /// [`Service`] connected to the container.
    service: Service<Postgres>,
}

impl Harness {
    async fn start() -> Self {
        let container = GenericImage::new("postgres", "16-alpine")
            .with_env_var("POSTGRES_PASSWORD", "postgres")
            .with_exposed_port(5432)
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .start()
            .await;
        let port = container.get_host_port_ipv4(5432).await;

        let mut postgres = Postgres::new(&Config {
            host: Some("127.0.0.1".into()),
            port: Some(port),
            user: Some("postgres".into()),
            password: Some("postgres".into()),
            dbname: Some("postgres".into()),
            ..Config::default()
        })
        .unwrap();

        // The server restarts once after the initialization, so the first
        // connections may be refused.
        let mut attempts = 0;
        while let Err(e) = migrations::runner().run_async(&mut postgres).await
        {
            attempts += 1;
            assert!(attempts < 30, "failed to run migrations: {e}");
            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        Self {
            _container: container,
            service: Service::new(postgres),
        }
    }
}

fn party_draft(type_id: i64, name: &str) -> party::Draft {
    party::Draft {
        type_id: Some(type_id.into()),
        name: party::Name::new(name),
    }
}

fn rule_draft(type_id: i64) -> accountability_rule::Draft {
    accountability_rule::Draft {
        accountability_type_id: Some(type_id.into()),
        parent_party_type_id: Some(1.into()),
        subsidiary_party_type_id: None,
    }
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn created_record_reads_back_with_initial_version() {
    let Harness { service, .. } = &Harness::start().await;

    let created = service
        .execute(CreateRecord::<Party>::new(party_draft(3, "Kenya")))
        .await
        .unwrap();
    let selected = service
        .execute(query::party::ById::by(created.id))
        .await
        .unwrap();

    assert_eq!(selected.as_ref(), Some(&created));
    assert_eq!(created.type_id, Some(3.into()));
    assert_eq!(created.name, party::Name::new("Kenya"));
    assert_eq!(created.version, Some(1.into()));
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn absent_id_selects_nothing() {
    let Harness { service, .. } = &Harness::start().await;

    let selected = service
        .execute(query::party::ById::by(party::Id::from(0)))
        .await
        .unwrap();

    assert_eq!(selected, None);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn deleting_absent_id_is_repeatable() {
    let Harness { service, .. } = &Harness::start().await;

    for _ in 0..2 {
        let deleted = service
            .execute(DeleteRecords::<By<Party, _>>::by(party::Id::from(404)))
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn filters_by_accountability_type() {
    let Harness { service, .. } = &Harness::start().await;
    for type_id in [5, 5, 6] {
        drop(
            service
                .execute(CreateRecord::<AccountabilityRule>::new(rule_draft(
                    type_id,
                )))
                .await
                .unwrap(),
        );
    }

    let filter = read::accountability_rule::Filter {
        accountability_type_id: Some(5.into()),
        ..read::accountability_rule::Filter::default()
    };
    let rules = service
        .execute(query::accountability_rule::List::by(filter.clone()))
        .await
        .unwrap();

    assert_eq!(rules.len(), 2);
    assert!(rules
        .iter()
        .all(|r| r.accountability_type_id == Some(5.into())));

    let deleted = service
        .execute(DeleteRecords::<By<AccountabilityRule, _>>::by(filter))
        .await
        .unwrap();
    assert_eq!(deleted, 2);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn filters_by_words_of_name() {
    let Harness { service, .. } = &Harness::start().await;
    for name in ["Kenya", "Uganda", "Ghana_50%"] {
        drop(
            service
                .execute(CreateRecord::<Party>::new(party_draft(1, name)))
                .await
                .unwrap(),
        );
    }

    let names = |filter| async move {
        let mut names = service
            .execute(query::party::List::by(filter))
            .await
            .unwrap()
            .into_iter()
            .filter_map(|p| p.name.map(|n| n.to_string()))
            .collect::<Vec<_>>();
        names.sort();
        names
    };

    assert_eq!(
        names(read::party::Filter {
            name: Some("KEN gand".into()),
            ..read::party::Filter::default()
        })
        .await,
        ["Kenya", "Uganda"],
    );
    assert_eq!(
        names(read::party::Filter {
            name: Some("a%5".into()),
            ..read::party::Filter::default()
        })
        .await,
        Vec::<String>::new(),
    );
    assert_eq!(
        names(read::party::Filter {
            name: Some("a_50%".into()),
            ..read::party::Filter::default()
        })
        .await,
        ["Ghana_50%"],
    );
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn updates_only_current_version() {
    let Harness { service, .. } = &Harness::start().await;
    let created = service
        .execute(CreateRecord::<Party>::new(party_draft(1, "Kenya")))
        .await
        .unwrap();

    let updated = service
        .execute(UpdateRecord::<Party>::new(Revision {
            id: created.id,
            version: 1.into(),
            draft: party_draft(2, "Republic of Kenya"),
        }))
        .await
        .unwrap();
    assert_eq!(updated.version, Some(2.into()));
    assert_eq!(updated.name, party::Name::new("Republic of Kenya"));

    let stale = service
        .execute(UpdateRecord::<Party>::new(Revision {
            id: created.id,
            version: 1.into(),
            draft: party_draft(3, "Kenya"),
        }))
        .await
        .unwrap_err();
    let stale: &update_record::ExecutionError<party::Id> = stale.as_ref();
    assert!(matches!(
        stale,
        update_record::ExecutionError::VersionMismatch { actual, .. }
            if *actual == 2.into(),
    ));

    let missing = service
        .execute(UpdateRecord::<Party>::new(Revision {
            id: party::Id::from(0),
            version: 1.into(),
            draft: party_draft(3, "Kenya"),
        }))
        .await
        .unwrap_err();
    let missing: &update_record::ExecutionError<party::Id> = missing.as_ref();
    assert!(matches!(
        missing,
        update_record::ExecutionError::NotExists(_),
    ));
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn quantity_observation_reads_back() {
    let Harness { service, .. } = &Harness::start().await;
    let draft = quantity_observation::Draft {
        task_id: Some(1.into()),
        party_id: Some(2.into()),
        database_id: None,
        reporting_table_id: Some(4.into()),
        reporting_variable_id: Some(5.into()),
        year: Some(2020),
        amount: Some(12.5),
        unit_id: Some(7.into()),
    };

    let created = service
        .execute(CreateRecord::<QuantityObservation>::new(draft))
        .await
        .unwrap();
    let listed = service
        .execute(query::quantity_observation::List::by(
            read::quantity_observation::Filter {
                party_id: Some(2.into()),
                year: Some(2020),
                ..read::quantity_observation::Filter::default()
            },
        ))
        .await
        .unwrap();

    assert_eq!(listed, [created.clone()]);
    assert_eq!(created.amount, Some(12.5));
    assert_eq!(created.database_id, None);
}
