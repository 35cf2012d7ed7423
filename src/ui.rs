// 🖥️ Console Menu - read, dispatch, repeat until Exit
//
// Storage errors are shown and the loop keeps going. End of input exits.

use anyhow::Result;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::data::{DataError, FileRepository, DATE_FORMAT};
use crate::domain::{ForageService, ForagerService, ItemService, ServiceResult};
use crate::models::{Category, Forage, Forager, Item};

pub type FileForagerService = ForagerService<FileRepository<Forager>>;
pub type FileItemService = ItemService<FileRepository<Item>>;
pub type FileForageService =
    ForageService<FileRepository<Forage>, FileRepository<Forager>, FileRepository<Item>>;

/// Every service the menu talks to, wired to the configured files
pub struct Services {
    pub foragers: FileForagerService,
    pub items: FileItemService,
    pub forages: FileForageService,
}

impl Services {
    pub fn open(config: &AppConfig) -> Self {
        let foragers = FileRepository::new(&config.foragers_file);
        let items = FileRepository::new(&config.items_file);
        let forages = FileRepository::new(&config.forages_file);

        Services {
            foragers: ForagerService::new(foragers.clone()),
            items: ItemService::new(items.clone()),
            forages: ForageService::new(forages, foragers, items),
        }
    }
}

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit,
    ViewForagesByDate,
    ViewItems,
    AddForage,
    AddForager,
    AddItem,
    ReportKgPerItem,
    ReportCategoryValue,
    ViewForagersByState,
}

impl MenuOption {
    pub const ALL: [MenuOption; 9] = [
        MenuOption::Exit,
        MenuOption::ViewForagesByDate,
        MenuOption::ViewItems,
        MenuOption::AddForage,
        MenuOption::AddForager,
        MenuOption::AddItem,
        MenuOption::ReportKgPerItem,
        MenuOption::ReportCategoryValue,
        MenuOption::ViewForagersByState,
    ];

    pub fn title(&self) -> &str {
        match self {
            MenuOption::Exit => "Exit",
            MenuOption::ViewForagesByDate => "View Forages By Date",
            MenuOption::ViewItems => "View Items",
            MenuOption::AddForage => "Add Forage",
            MenuOption::AddForager => "Add Forager",
            MenuOption::AddItem => "Add Item",
            MenuOption::ReportKgPerItem => "Report: Kilograms Of Item",
            MenuOption::ReportCategoryValue => "Report: Item Category Value",
            MenuOption::ViewForagersByState => "View Foragers By State",
        }
    }
}

/// Input ran out while a prompt was waiting
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

// ============================================================================
// CONTROLLER
// ============================================================================

pub struct Controller<R: BufRead, W: Write> {
    services: Services,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(services: Services, input: R, output: W) -> Self {
        Controller {
            services,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.display_header(&format!("Welcome to Sustainable Foraging v{}", crate::VERSION))?;

        loop {
            let option = match self.select_main_menu_option() {
                Ok(option) => option,
                Err(e) if e.is::<EndOfInput>() => break,
                Err(e) => return Err(e),
            };

            if option == MenuOption::Exit {
                break;
            }

            match self.dispatch(option) {
                Ok(()) => {}
                Err(e) if e.is::<EndOfInput>() => break,
                Err(e) => match e.downcast_ref::<DataError>() {
                    Some(data_error) => {
                        tracing::error!(error = %data_error, "storage failure");
                        let message = data_error.to_string();
                        self.display_status(false, &[message])?;
                    }
                    None => return Err(e),
                },
            }
        }

        self.display_header("Goodbye.")?;
        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> Result<()> {
        self.display_header(option.title())?;
        match option {
            MenuOption::Exit => Ok(()),
            MenuOption::ViewForagesByDate => self.view_by_date(),
            MenuOption::ViewItems => self.view_items(),
            MenuOption::AddForage => self.add_forage(),
            MenuOption::AddForager => self.add_forager(),
            MenuOption::AddItem => self.add_item(),
            MenuOption::ReportKgPerItem => self.report_kg_per_item(),
            MenuOption::ReportCategoryValue => self.report_category_value(),
            MenuOption::ViewForagersByState => self.view_foragers_by_state(),
        }
    }

    // ------------------------------------------------------------------------
    // Menu actions
    // ------------------------------------------------------------------------

    fn view_by_date(&mut self) -> Result<()> {
        let date = self.read_date("Select a date [yyyy-mm-dd]: ")?;
        let forages = self.services.forages.find_by_date(date);

        if forages.is_empty() {
            writeln!(self.output, "No forages found.")?;
            return Ok(());
        }

        for forage in &forages {
            let forager = self
                .services
                .foragers
                .find_by_id(&forage.forager_id)
                .map(|f| f.full_name())
                .unwrap_or_else(|| forage.forager_id.clone());
            let item = self
                .services
                .items
                .find_by_id(&forage.item_id)
                .map(|i| i.name)
                .unwrap_or_else(|| forage.item_id.clone());
            writeln!(
                self.output,
                "{} {} - {}: {:.2} kg",
                forage.date.format(DATE_FORMAT),
                forager,
                item,
                forage.kilograms
            )?;
        }
        Ok(())
    }

    fn view_items(&mut self) -> Result<()> {
        let category = self.read_category()?;
        let items = self.services.items.find_by_category(category);
        self.display_items(&items)
    }

    fn view_foragers_by_state(&mut self) -> Result<()> {
        let state = self.read_required("State abbreviation: ")?;
        let foragers = self.services.foragers.find_by_state(&state);

        if foragers.is_empty() {
            writeln!(self.output, "No foragers found.")?;
        }
        for forager in &foragers {
            writeln!(self.output, "{} {} ({})", forager.first_name, forager.last_name, forager.state)?;
        }
        Ok(())
    }

    fn add_forage(&mut self) -> Result<()> {
        let Some(forager) = self.choose_forager()? else {
            return Ok(());
        };
        let Some(item) = self.choose_item()? else {
            return Ok(());
        };
        let date = self.read_date("Forage date [yyyy-mm-dd]: ")?;
        let kilograms = self.read_f64("Kilograms: ")?;

        let result = self
            .services
            .forages
            .add(Forage::new(&forager.id, &item.id, date, kilograms))?;
        self.display_result(&result, |f| format!("Forage {} created.", f.id))
    }

    fn add_forager(&mut self) -> Result<()> {
        let first_name = self.read_line_or_end("First name: ")?;
        let last_name = self.read_line_or_end("Last name: ")?;
        let state = self.read_line_or_end("State abbreviation: ")?;

        let result = self
            .services
            .foragers
            .add(Forager::new(&first_name, &last_name, &state))?;
        self.display_result(&result, |f| {
            format!("Forager '{} {}' added.", f.first_name, f.last_name)
        })
    }

    fn add_item(&mut self) -> Result<()> {
        let name = self.read_line_or_end("Item name: ")?;
        let category = self.read_category()?;
        let dollars_per_kilogram = self.read_f64("$/Kg: ")?;

        let result = self
            .services
            .items
            .add(Item::new(&name, category, dollars_per_kilogram))?;
        self.display_result(&result, |i| format!("Item {} created.", i.id))
    }

    fn report_kg_per_item(&mut self) -> Result<()> {
        let date = self.read_date("Select a date [yyyy-mm-dd]: ")?;
        let totals = self.services.forages.kilograms_per_item(date);

        let mut rows: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(item_id, kg)| {
                let name = self
                    .services
                    .items
                    .find_by_id(&item_id)
                    .map(|i| i.name)
                    .unwrap_or(item_id);
                (name, kg)
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        self.display_header(&format!("Kilograms of Item for the Date {}", date.format(DATE_FORMAT)))?;
        if rows.is_empty() {
            writeln!(self.output, "No forages found.")?;
        }
        for (name, kg) in rows {
            writeln!(self.output, "{}: {:.2} kg", name, kg)?;
        }
        Ok(())
    }

    fn report_category_value(&mut self) -> Result<()> {
        let date = self.read_date("Select a date [yyyy-mm-dd]: ")?;
        let totals = self.services.forages.value_per_category(date);

        self.display_header(&format!("Item Category Value for the Date {}", date.format(DATE_FORMAT)))?;
        if totals.is_empty() {
            writeln!(self.output, "No forages found.")?;
        }
        for category in Category::ALL {
            if let Some(value) = totals.get(&category) {
                writeln!(self.output, "{}: ${:.2}", category, value)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Choosers
    // ------------------------------------------------------------------------

    fn choose_forager(&mut self) -> Result<Option<Forager>> {
        let prefix = self.read_required("Forager last name starts with: ")?;
        let foragers = self.services.foragers.find_by_last_name(&prefix);

        if foragers.is_empty() {
            self.display_status(false, &["No foragers found.".to_string()])?;
            return Ok(None);
        }

        for (i, forager) in foragers.iter().enumerate() {
            writeln!(self.output, "{}: {} ({})", i + 1, forager.full_name(), forager.state)?;
        }
        writeln!(self.output, "0: Exit")?;

        let choice = self.read_int("Select a forager: ", 0, foragers.len())?;
        Ok(choice.checked_sub(1).and_then(|i| foragers.get(i).cloned()))
    }

    fn choose_item(&mut self) -> Result<Option<Item>> {
        let category = self.read_category()?;
        let items = self.services.items.find_by_category(category);

        if items.is_empty() {
            self.display_status(false, &["No items found.".to_string()])?;
            return Ok(None);
        }

        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}: {}", i + 1, item.name)?;
        }
        writeln!(self.output, "0: Exit")?;

        let choice = self.read_int("Select an item: ", 0, items.len())?;
        Ok(choice.checked_sub(1).and_then(|i| items.get(i).cloned()))
    }

    // ------------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------------

    fn select_main_menu_option(&mut self) -> Result<MenuOption> {
        self.display_header("Main Menu")?;
        for (i, option) in MenuOption::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i, option.title())?;
        }
        let max = MenuOption::ALL.len() - 1;
        let choice = self.read_int(&format!("Select [0-{}]: ", max), 0, max)?;
        Ok(MenuOption::ALL[choice])
    }

    fn display_header(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", message)?;
        writeln!(self.output, "{}", "=".repeat(message.chars().count()))
    }

    fn display_status(&mut self, success: bool, messages: &[String]) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", if success { "[Success]" } else { "[Err]" })?;
        for message in messages {
            writeln!(self.output, "{}", message)?;
        }
        Ok(())
    }

    fn display_result<T>(
        &mut self,
        result: &ServiceResult<T>,
        success_message: impl FnOnce(&T) -> String,
    ) -> Result<()> {
        match result.payload() {
            Some(payload) if result.is_success() => {
                let message = success_message(payload);
                self.display_status(true, &[message])?;
            }
            _ => self.display_status(false, result.messages())?,
        }
        Ok(())
    }

    fn display_items(&mut self, items: &[Item]) -> Result<()> {
        if items.is_empty() {
            writeln!(self.output, "No items found.")?;
        }
        for item in items {
            writeln!(
                self.output,
                "{}: {}, {}, ${:.2}/kg",
                item.id, item.name, item.category, item.dollars_per_kilogram
            )?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------

    /// One trimmed line, or `None` at end of input
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_line_or_end(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?.ok_or_else(|| EndOfInput.into())
    }

    fn read_required(&mut self, prompt: &str) -> Result<String> {
        loop {
            let value = self.read_line_or_end(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "Value is required.")?;
        }
    }

    fn read_int(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize> {
        loop {
            let value = self.read_line_or_end(prompt)?;
            match value.parse::<usize>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                _ => writeln!(self.output, "Value must be between {} and {}.", min, max)?,
            }
        }
    }

    fn read_f64(&mut self, prompt: &str) -> Result<f64> {
        loop {
            let value = self.read_line_or_end(prompt)?;
            match value.parse::<f64>() {
                Ok(n) => return Ok(n),
                Err(_) => writeln!(self.output, "Value must be a number.")?,
            }
        }
    }

    fn read_date(&mut self, prompt: &str) -> Result<NaiveDate> {
        loop {
            let value = self.read_line_or_end(prompt)?;
            let parsed = NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .or_else(|_| NaiveDate::parse_from_str(&value, "%m/%d/%Y"));
            match parsed {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "Date must be in yyyy-mm-dd format.")?,
            }
        }
    }

    fn read_category(&mut self) -> Result<Category> {
        for (i, category) in Category::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, category)?;
        }
        let choice = self.read_int("Select a category: ", 1, Category::ALL.len())?;
        Ok(Category::ALL[choice - 1])
    }
}
