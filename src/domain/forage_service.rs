// 📅 Forage Service - references, dates, weights, same-day duplicates, reports

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::data::{Repository, Result, DATE_FORMAT};
use crate::models::{Category, Forage, Forager, Item};

use super::report;
use super::result::ServiceResult;

/// Upper bound (exclusive) on kilograms in a single forage
pub const MAX_KILOGRAMS: f64 = 250.0;

pub struct ForageService<F, G, I>
where
    F: Repository<Forage>,
    G: Repository<Forager>,
    I: Repository<Item>,
{
    forages: F,
    foragers: G,
    items: I,
}

impl<F, G, I> ForageService<F, G, I>
where
    F: Repository<Forage>,
    G: Repository<Forager>,
    I: Repository<Item>,
{
    pub fn new(forages: F, foragers: G, items: I) -> Self {
        ForageService {
            forages,
            foragers,
            items,
        }
    }

    /// Forages on exactly `date`
    pub fn find_by_date(&self, date: NaiveDate) -> Vec<Forage> {
        self.forages
            .find_by_field(&date.format(DATE_FORMAT).to_string())
    }

    /// Validate and store a forage, assigning a UUID when the id is empty
    pub fn add(&self, forage: Forage) -> Result<ServiceResult<Forage>> {
        self.add_as_of(forage, Local::now().date_naive())
    }

    /// `add` with an explicit "today" for the future-date rule
    pub fn add_as_of(&self, mut forage: Forage, today: NaiveDate) -> Result<ServiceResult<Forage>> {
        let mut result = self.validate(&forage, today);

        if !result.is_success() {
            tracing::warn!(errors = ?result.messages(), "forage rejected");
            return Ok(result);
        }

        if forage.id.trim().is_empty() {
            forage.id = uuid::Uuid::new_v4().to_string();
        }

        let stored = self.forages.add(forage)?;
        result.set_payload(stored);
        Ok(result)
    }

    /// Kilograms collected per item id on `date`
    pub fn kilograms_per_item(&self, date: NaiveDate) -> HashMap<String, f64> {
        report::kilograms_by_item(&self.find_by_date(date))
    }

    /// Dollar value collected per category on `date`
    pub fn value_per_category(&self, date: NaiveDate) -> HashMap<Category, f64> {
        report::value_by_category(&self.find_by_date(date), &self.items.find_all())
    }

    fn validate(&self, forage: &Forage, today: NaiveDate) -> ServiceResult<Forage> {
        let mut result = ServiceResult::new();

        let forager = if forage.forager_id.trim().is_empty() {
            result.add_error_message("Forager is required.");
            None
        } else {
            let found = self.foragers.find_by_id(&forage.forager_id);
            if found.is_none() {
                result.add_error_message(format!("Forager {} does not exist.", forage.forager_id));
            }
            found
        };

        let item = if forage.item_id.trim().is_empty() {
            result.add_error_message("Item is required.");
            None
        } else {
            let found = self.items.find_by_id(&forage.item_id);
            if found.is_none() {
                result.add_error_message(format!("Item {} does not exist.", forage.item_id));
            }
            found
        };

        if forage.date > today {
            result.add_error_message("Forage date cannot be in the future.");
        }

        let kg = forage.kilograms;
        if !kg.is_finite() || kg <= 0.0 || kg >= MAX_KILOGRAMS {
            result.add_error_message("Kilograms must be a positive number less than 250.0.");
        }

        if let (Some(forager), Some(item)) = (forager, item) {
            let taken = self
                .find_by_date(forage.date)
                .iter()
                .any(|existing| existing.collides_with(forage));

            if taken {
                result.add_error_message(format!(
                    "Item {} is already foraged by {} on {}.",
                    item.name,
                    forager.full_name(),
                    forage.date.format(DATE_FORMAT)
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileRepository;
    use tempfile::TempDir;

    type FileForageService =
        ForageService<FileRepository<Forage>, FileRepository<Forager>, FileRepository<Item>>;

    struct Fixture {
        _dir: TempDir,
        service: FileForageService,
        forager_id: String,
        fungi_id: String,
        nuts_id: String,
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn today() -> NaiveDate {
        date("2024-06-30")
    }

    fn create_fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let foragers: FileRepository<Forager> = FileRepository::new(dir.path().join("foragers.csv"));
        let items: FileRepository<Item> = FileRepository::new(dir.path().join("items.csv"));
        let forages: FileRepository<Forage> = FileRepository::new(dir.path().join("forages.csv"));

        let mut sam = Forager::new("Sam", "Lee", "CA");
        sam.id = "forager-1".to_string();
        foragers.add(sam).unwrap();

        let mut morel = Item::new("Morel", Category::Fungi, 40.0);
        morel.id = "1".to_string();
        items.add(morel).unwrap();

        let mut walnut = Item::new("Walnut", Category::Nuts, 5.0);
        walnut.id = "2".to_string();
        items.add(walnut).unwrap();

        Fixture {
            _dir: dir,
            service: ForageService::new(forages, foragers, items),
            forager_id: "forager-1".to_string(),
            fungi_id: "1".to_string(),
            nuts_id: "2".to_string(),
        }
    }

    #[test]
    fn test_add_valid_forage() {
        let fx = create_fixture();
        let forage = Forage::new(&fx.forager_id, &fx.fungi_id, date("2024-06-01"), 2.5);

        let result = fx.service.add_as_of(forage, today()).unwrap();
        assert!(result.is_success());

        let stored = result.payload().unwrap();
        assert!(!stored.id.is_empty());
        assert_eq!(fx.service.find_by_date(date("2024-06-01")), vec![stored.clone()]);
        assert!(fx.service.find_by_date(date("2024-06-02")).is_empty());
    }

    #[test]
    fn test_add_accepts_mixed_case_forager_reference() {
        let fx = create_fixture();
        let forage = Forage::new("FORAGER-1", &fx.fungi_id, date("2024-06-01"), 1.0);

        assert!(fx.service.add_as_of(forage, today()).unwrap().is_success());
    }

    #[test]
    fn test_add_reports_every_problem() {
        let fx = create_fixture();
        let forage = Forage::new("", "404", date("2024-07-01"), 0.0);

        let result = fx.service.add_as_of(forage, today()).unwrap();
        assert_eq!(
            result.messages(),
            [
                "Forager is required.",
                "Item 404 does not exist.",
                "Forage date cannot be in the future.",
                "Kilograms must be a positive number less than 250.0.",
            ]
        );
        assert!(fx.service.find_by_date(date("2024-07-01")).is_empty());
    }

    #[test]
    fn test_kilogram_bounds() {
        let fx = create_fixture();
        let heavy = Forage::new(&fx.forager_id, &fx.fungi_id, date("2024-06-01"), 250.0);
        let light = Forage::new(&fx.forager_id, &fx.fungi_id, date("2024-06-02"), 249.9);

        assert!(!fx.service.add_as_of(heavy, today()).unwrap().is_success());
        assert!(fx.service.add_as_of(light, today()).unwrap().is_success());
    }

    #[test]
    fn test_add_rejects_same_day_duplicate() {
        let fx = create_fixture();
        let first = Forage::new(&fx.forager_id, &fx.fungi_id, date("2024-06-01"), 1.0);
        let again = Forage::new(&fx.forager_id, &fx.fungi_id, date("2024-06-01"), 3.0);

        assert!(fx.service.add_as_of(first, today()).unwrap().is_success());
        let result = fx.service.add_as_of(again, today()).unwrap();

        assert_eq!(
            result.messages(),
            ["Item Morel is already foraged by Sam Lee on 2024-06-01."]
        );
        assert_eq!(fx.service.find_by_date(date("2024-06-01")).len(), 1);
    }

    #[test]
    fn test_reports_for_one_date() {
        let fx = create_fixture();
        let d = date("2024-06-10");
        let other = date("2024-06-11");

        let mut kim = Forager::new("Kim", "Park", "WA");
        kim.id = "forager-2".to_string();
        fx.service.foragers.add(kim).unwrap();

        for (forager, item, day, kg) in [
            (fx.forager_id.as_str(), fx.fungi_id.as_str(), d, 2.0),
            ("forager-2", fx.fungi_id.as_str(), d, 3.0),
            (fx.forager_id.as_str(), fx.nuts_id.as_str(), d, 1.0),
            (fx.forager_id.as_str(), fx.nuts_id.as_str(), other, 50.0),
        ] {
            let result = fx
                .service
                .add_as_of(Forage::new(forager, item, day, kg), today())
                .unwrap();
            assert!(result.is_success(), "{:?}", result.messages());
        }

        let kg = fx.service.kilograms_per_item(d);
        assert_eq!(kg.len(), 2);
        assert_eq!(kg["1"], 5.0);
        assert_eq!(kg["2"], 1.0);

        let value = fx.service.value_per_category(d);
        assert_eq!(value[&Category::Fungi], 200.0);
        assert_eq!(value[&Category::Nuts], 5.0);
    }
}
