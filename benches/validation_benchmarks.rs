//! Performance benchmarks for record validation and view updates.
//!
//! These benchmarks measure:
//! - Validating pages of different sizes
//! - Summarizing validation results
//! - Loading and filtering a validation view over an in-memory store

use async_trait::async_trait;
use contact_audit::domain::{ContactId, Field};
use contact_audit::error::StoreResult;
use contact_audit::models::{Contact, ContactPage, UploadSummary, ValidationPage};
use contact_audit::repositories::ContactStore;
use contact_audit::validation::{summarize, validate_all};
use contact_audit::view::{StatusFilter, ViewController, ViewEvent, ViewMode};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Mixed valid and invalid contacts, roughly one in four invalid.
fn generate_contacts(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|i| {
            let (email, phone) = match i % 4 {
                0 => (format!("user{}@unknownmail.xyz", i), "9611234567".to_string()),
                1 => (format!("user{}@gmail.com", i), format!("96{:08}", i)),
                2 => (format!("user{}@hotmail.com", i), "9941234567".to_string()),
                _ => (format!("user{}@yahoo.com.mx", i), "9631234567".to_string()),
            };
            Contact::new(
                ContactId::new(i.to_string()).unwrap(),
                format!("{}", 1000 + i),
                "María Fernanda Ortiz",
                email,
                phone,
            )
        })
        .collect()
}

/// Store that serves a fixed collection without I/O.
struct StaticStore {
    contacts: Vec<Contact>,
}

#[async_trait]
impl ContactStore for StaticStore {
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage> {
        Ok(ContactPage {
            data: self.slice(page, page_size),
            total: self.contacts.len(),
            total_pages: self.contacts.len().div_ceil(page_size),
        })
    }

    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>> {
        Ok(self
            .contacts
            .iter()
            .filter(|c| c.field(field).contains(value))
            .cloned()
            .collect())
    }

    async fn update_contact(&self, _id: &ContactId, contact: &Contact) -> StoreResult<Contact> {
        Ok(contact.clone())
    }

    async fn validate_contacts(
        &self,
        page: usize,
        page_size: usize,
    ) -> StoreResult<ValidationPage> {
        Ok(ValidationPage {
            data: validate_all(&self.slice(page, page_size)),
            total_pages: self.contacts.len().div_ceil(page_size),
            stats: None,
        })
    }

    async fn upload_spreadsheet(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> StoreResult<UploadSummary> {
        Ok(UploadSummary::default())
    }

    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl StaticStore {
    fn slice(&self, page: usize, page_size: usize) -> Vec<Contact> {
        self.contacts
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect()
    }
}

/// Benchmark validating pages of increasing size.
fn bench_validate_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_page");

    for size in [50, 500, 5000] {
        let contacts = generate_contacts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &contacts, |b, contacts| {
            b.iter(|| validate_all(contacts));
        });
    }

    group.finish();
}

/// Benchmark summary counts over a validated page.
fn bench_summarize(c: &mut Criterion) {
    let results = validate_all(&generate_contacts(5000));

    c.bench_function("summarize_5000", |b| {
        b.iter(|| summarize(&results));
    });
}

/// Benchmark a page load followed by a local filter change.
fn bench_view_load_and_filter(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = Arc::new(StaticStore {
        contacts: generate_contacts(2000),
    }) as Arc<dyn ContactStore>;

    c.bench_function("view_load_and_filter", |b| {
        b.to_async(&rt).iter(|| async {
            let view = ViewController::new(store.clone(), ViewMode::Contacts, 50);
            view.dispatch(ViewEvent::Load(1)).await.unwrap();
            view.dispatch(ViewEvent::SetFilter(StatusFilter::Invalid))
                .await
                .unwrap();
            view.snapshot().visible().len()
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = bench_validate_page, bench_summarize, bench_view_load_and_filter
}

criterion_main!(benches);
