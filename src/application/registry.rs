//! Student registry use cases

use crate::domain::{parse_amount, parse_payment, Student};
use crate::error::{BursarError, Result};
use crate::infrastructure::StudentStore;
use rust_decimal::Decimal;
use tracing::info;

/// In-memory registry of students, persisted through a [`StudentStore`]
/// after every change.
///
/// Students keep insertion order. A failed save is returned to the caller but
/// the in-memory change stays applied, so memory and store can differ until
/// the next successful save.
#[derive(Debug)]
pub struct Registry<S: StudentStore> {
    store: S,
    students: Vec<Student>,
}

impl<S: StudentStore> Registry<S> {
    /// Create an empty registry without reading the store
    pub fn new(store: S) -> Self {
        Registry {
            store,
            students: Vec::new(),
        }
    }

    /// Create a registry from the store's current contents
    pub fn open(store: S) -> Result<Self> {
        let students = store.load()?;
        Ok(Registry { store, students })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a new student with an opening balance
    pub fn register_student(&mut self, id: &str, name: &str, amount: &str) -> Result<Student> {
        let (id, name, amount) = (id.trim(), name.trim(), amount.trim());

        if id.is_empty() || name.is_empty() || amount.is_empty() {
            return Err(BursarError::Validation(
                "All fields are required".to_string(),
            ));
        }
        check_record_field("ID", id)?;
        check_record_field("name", name)?;

        if self.find_by_id(id).is_some() {
            return Err(BursarError::Duplicate(id.to_string()));
        }

        let amount_paid = parse_amount(amount)?;
        let student = Student::new(id, name, amount_paid);
        self.students.push(student.clone());
        info!(id = %student.id, amount = %student.amount_paid, "student registered");

        self.persist()?;
        Ok(student)
    }

    /// Add a payment to an existing student and return the new total
    pub fn add_payment(&mut self, id: &str, payment: &str) -> Result<Decimal> {
        let id = id.trim();
        let student = self
            .students
            .iter_mut()
            .find(|s| s.has_id(id))
            .ok_or_else(|| BursarError::NotFound(id.to_string()))?;

        let payment = parse_payment(payment)?;
        let total = student.add_payment(payment)?;
        info!(id = %student.id, %payment, %total, "payment recorded");

        self.persist()?;
        Ok(total)
    }

    /// Case-insensitive lookup by id
    pub fn find_by_id(&self, id: &str) -> Option<&Student> {
        let id = id.trim();
        self.students.iter().find(|s| s.has_id(id))
    }

    /// All students in insertion order
    pub fn list_all(&self) -> &[Student] {
        &self.students
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.students)
    }
}

/// Reject characters the line format cannot hold
fn check_record_field(field: &str, value: &str) -> Result<()> {
    if value.contains([',', '\n', '\r']) {
        return Err(BursarError::Validation(format!(
            "{} must not contain commas or line breaks: '{}'",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local};
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    /// Keeps the last saved snapshot in memory
    #[derive(Debug, Default)]
    struct MemoryStore {
        initial: Vec<Student>,
        saved: Option<Vec<Student>>,
        saves: usize,
        fail_saves: bool,
    }

    impl StudentStore for MemoryStore {
        fn load(&self) -> Result<Vec<Student>> {
            Ok(self.saved.clone().unwrap_or_else(|| self.initial.clone()))
        }

        fn save(&mut self, students: &[Student]) -> Result<()> {
            self.saves += 1;
            if self.fail_saves {
                return Err(BursarError::persistence(
                    "memory",
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.saved = Some(students.to_vec());
            Ok(())
        }

        fn write_receipt(&self, student: &Student, _: DateTime<Local>) -> Result<PathBuf> {
            Ok(PathBuf::from(format!("receipt_{}.txt", student.id)))
        }
    }

    fn registry() -> Registry<MemoryStore> {
        Registry::new(MemoryStore::default())
    }

    #[test]
    fn test_register_then_find() {
        let mut registry = registry();

        let student = registry.register_student("S1", "Alice", "100.0").unwrap();
        assert_eq!(student, Student::new("S1", "Alice", dec!(100.0)));

        let found = registry.find_by_id("S1").unwrap();
        assert_eq!(found.id, "S1");
        assert_eq!(found.name, "Alice");
        assert_eq!(found.amount_paid, dec!(100));
    }

    #[test]
    fn test_register_trims_input() {
        let mut registry = registry();

        registry
            .register_student("  S1 ", " Alice Smith ", " 5 ")
            .unwrap();

        let found = registry.find_by_id("S1").unwrap();
        assert_eq!(found.id, "S1");
        assert_eq!(found.name, "Alice Smith");
    }

    #[test]
    fn test_register_persists_whole_registry() {
        let mut registry = registry();

        registry.register_student("S1", "Alice", "1").unwrap();
        registry.register_student("S2", "Bob", "2").unwrap();

        assert_eq!(registry.store().saves, 2);
        assert_eq!(
            registry.store().saved.as_deref(),
            Some(registry.list_all())
        );
    }

    #[test]
    fn test_register_duplicate_any_case_fails() {
        let mut registry = registry();
        registry.register_student("S1", "Alice", "10").unwrap();

        for id in ["S1", "s1", " s1 "] {
            let err = registry.register_student(id, "Other", "5").unwrap_err();
            assert!(matches!(err, BursarError::Duplicate(_)));
        }

        assert_eq!(registry.list_all().len(), 1);
        assert_eq!(registry.find_by_id("s1").unwrap().name, "Alice");
        assert_eq!(registry.store().saves, 1);
    }

    #[test]
    fn test_register_duplicate_checked_before_amount() {
        let mut registry = registry();
        registry.register_student("S1", "Alice", "10").unwrap();

        assert!(matches!(
            registry.register_student("S1", "Alice", "abc"),
            Err(BursarError::Duplicate(_))
        ));
    }

    #[test]
    fn test_register_empty_fields_fail() {
        let mut registry = registry();

        for (id, name, amount) in [("", "x", "5"), ("x", "", "5"), ("x", "y", ""), ("  ", "x", "5")] {
            let err = registry.register_student(id, name, amount).unwrap_err();
            assert!(
                matches!(err, BursarError::Validation(_)),
                "expected validation error for {:?}",
                (id, name, amount)
            );
        }

        assert!(registry.list_all().is_empty());
        assert_eq!(registry.store().saves, 0);
    }

    #[test]
    fn test_register_negative_or_bad_amount_fails() {
        let mut registry = registry();

        assert!(matches!(
            registry.register_student("x", "y", "-1"),
            Err(BursarError::Validation(_))
        ));
        assert!(matches!(
            registry.register_student("x", "y", "five"),
            Err(BursarError::Validation(_))
        ));
        assert!(registry.list_all().is_empty());
    }

    #[test]
    fn test_register_zero_amount_allowed() {
        let mut registry = registry();
        let student = registry.register_student("S1", "Alice", "0").unwrap();
        assert_eq!(student.amount_paid, Decimal::ZERO);
    }

    #[test]
    fn test_register_rejects_commas() {
        let mut registry = registry();

        assert!(matches!(
            registry.register_student("S1", "Smith, Alice", "1"),
            Err(BursarError::Validation(_))
        ));
        assert!(matches!(
            registry.register_student("S,1", "Alice", "1"),
            Err(BursarError::Validation(_))
        ));
    }

    #[test]
    fn test_add_payment_missing_student() {
        let mut registry = registry();

        assert!(matches!(
            registry.add_payment("nobody", "10"),
            Err(BursarError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_payment_requires_positive_amount() {
        let mut registry = registry();
        registry.register_student("S1", "Alice", "5.00").unwrap();

        for bad in ["0", "-5", "abc", ""] {
            assert!(matches!(
                registry.add_payment("S1", bad),
                Err(BursarError::Validation(_))
            ));
        }

        assert_eq!(registry.find_by_id("S1").unwrap().amount_paid, dec!(5.00));
        assert_eq!(registry.store().saves, 1);
    }

    #[test]
    fn test_add_payment_accumulates_and_persists() {
        let mut registry = registry();
        registry.register_student("S1", "Alice", "5.00").unwrap();

        let total = registry.add_payment("S1", "10.50").unwrap();

        assert_eq!(total, dec!(15.50));
        assert_eq!(registry.find_by_id("S1").unwrap().amount_paid, dec!(15.50));
        let saved = registry.store().saved.clone().unwrap();
        assert_eq!(saved[0].amount_paid, dec!(15.50));
    }

    #[test]
    fn test_add_payment_past_maximum_is_rejected() {
        let mut registry = registry();
        registry
            .register_student("S1", "Alice", "79228162514264337593543950335")
            .unwrap();

        let err = registry.add_payment("S1", "1").unwrap_err();

        assert!(matches!(err, BursarError::Validation(_)));
        assert_eq!(registry.find_by_id("S1").unwrap().amount_paid, Decimal::MAX);
        assert_eq!(registry.store().saves, 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut registry = registry();

        registry.register_student("S1", "Alice", "100.0").unwrap();
        registry.register_student("S2", "Bob", "50").unwrap();
        registry.add_payment("s1", "25.5").unwrap();

        assert_eq!(registry.find_by_id("S1").unwrap().amount_paid, dec!(125.5));
        assert_eq!(
            registry.list_all(),
            &[
                Student::new("S1", "Alice", dec!(125.5)),
                Student::new("S2", "Bob", dec!(50.0)),
            ]
        );
    }

    #[test]
    fn test_open_loads_store_contents() {
        let store = MemoryStore {
            initial: vec![
                Student::new("B", "Bob", dec!(2)),
                Student::new("A", "Alice", dec!(1)),
            ],
            ..Default::default()
        };

        let registry = Registry::open(store).unwrap();

        let ids: Vec<&str> = registry.list_all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(registry.find_by_id("a").unwrap().name, "Alice");
    }

    #[test]
    fn test_reopen_after_mutations() {
        let mut registry = registry();
        registry.register_student("S1", "Alice", "1").unwrap();
        registry.add_payment("S1", "2").unwrap();

        let reopened = Registry::open(registry.store).unwrap();
        assert_eq!(
            reopened.list_all(),
            &[Student::new("S1", "Alice", dec!(3))]
        );
    }

    #[test]
    fn test_failed_save_keeps_in_memory_change() {
        let store = MemoryStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut registry = Registry::new(store);

        let err = registry.register_student("S1", "Alice", "10").unwrap_err();
        assert!(matches!(err, BursarError::Persistence { .. }));
        assert!(registry.find_by_id("S1").is_some());

        let err = registry.add_payment("S1", "5").unwrap_err();
        assert!(matches!(err, BursarError::Persistence { .. }));
        assert_eq!(registry.find_by_id("S1").unwrap().amount_paid, dec!(15));
    }
}
