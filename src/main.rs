use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use shoplist::actions::{
    ItemRowAction, ListActionOutcome, apply_item_action, apply_list_action, item_row_bindings,
    list_row_bindings,
};
use shoplist::config::Config;
use shoplist::currency::{format_currency, format_date, parse_currency};
use shoplist::gesture::{SwipeRecognizer, drag_script};
use shoplist::suggestions::suggest;
use shoplist::view::{bought_count, category_counts, group_by_category, move_item, process_items};
use shoplist::{
    Category, FileStorage, Item, ItemFilter, ItemUpdate, ListFilter, Mutation, NewItem, SettingsUpdate, ShoppingList,
    ShoppingStore, SortDirection, SortField, Theme, list_progress, list_to_text, list_total_value,
};
use std::path::PathBuf;

type Store = ShoppingStore<FileStorage>;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Shoplist CLI - shopping lists kept on this device")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Directory holding the stored lists (default: platform data directory)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/shoplist/shoplist.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show lists with progress and totals
    Lists {
        /// Show archived lists instead of active ones
        #[arg(long)]
        archived: bool,

        /// Only lists whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create an empty list
    Create {
        #[arg(value_parser = parse_name)]
        title: String,
    },

    /// Change a list's title
    Rename {
        list: String,

        #[arg(value_parser = parse_name)]
        title: String,
    },

    /// Delete a list and its items
    Delete { list: String },

    /// Hide a list from the active view
    Archive { list: String },

    /// Bring an archived list back
    Restore { list: String },

    /// Copy a list with all of its items
    Duplicate { list: String },

    /// Add an item to a list
    Add {
        list: String,

        #[arg(value_parser = parse_name)]
        name: String,

        #[arg(short, long, default_value_t = 1.0, value_parser = parse_quantity)]
        quantity: f64,

        #[arg(short, long, default_value = "grocery")]
        category: Category,

        /// Unit price, e.g. "12,90" or "R$ 12,90"
        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,
    },

    /// Change fields of an item
    Edit {
        list: String,
        item: String,

        #[arg(long, value_parser = parse_name)]
        name: Option<String>,

        #[arg(short, long, value_parser = parse_quantity)]
        quantity: Option<f64>,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,
    },

    /// Remove an item
    Remove { list: String, item: String },

    /// Flip an item between bought and not bought
    Toggle { list: String, item: String },

    /// Move an item to a position (1-based) in the stored order
    Move { list: String, item: String, position: usize },

    /// Mark every item bought (or not bought with --unbought)
    MarkAll {
        list: String,

        #[arg(long)]
        unbought: bool,
    },

    /// Remove every bought item
    ClearBought { list: String },

    /// Show a list's items
    Show {
        list: String,

        /// Sort field (default: from settings)
        #[arg(long)]
        sort: Option<SortField>,

        /// Sort direction (default: from settings)
        #[arg(long)]
        direction: Option<SortDirection>,

        /// Only items in this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Only items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Group items by category
        #[arg(short, long)]
        group: bool,
    },

    /// Print a list as shareable text
    Export { list: String },

    /// Show or change settings
    Settings {
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        sort: Option<SortField>,

        #[arg(long)]
        direction: Option<SortDirection>,

        /// Switch between dark and light
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,
    },

    /// Suggest product names
    Suggest {
        query: String,

        #[arg(short, long, default_value_t = 8)]
        limit: usize,
    },

    /// Replay a drag on a row; item rows when ITEM is given, else the list row
    Swipe {
        list: String,
        item: Option<String>,

        /// Horizontal displacement (negative is left)
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,

        /// Vertical displacement
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        dy: f64,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let config = Config::load_from(cli.config.as_deref())?;
    if cli.no_color || !config.color_enabled() {
        colored::control::set_override(false);
    }

    // Open store
    let data_dir = config.resolve_data_dir(cli.data_dir)?;
    let mut store = ShoppingStore::open(FileStorage::open(&data_dir)?)?;

    match cli.command {
        Commands::Lists { archived, search } => {
            let mut filter = if archived { ListFilter::archived() } else { ListFilter::default() };
            filter.search = search;
            let lists = filter.apply(store.lists());
            if lists.is_empty() {
                println!("{}", "No lists".dimmed());
            }
            for list in lists {
                print_list_summary(list);
            }
        }
        Commands::Create { title } => {
            let list = store.create_list(&title)?;
            println!("Created list {} ({})", list.title.bold(), list.id.dimmed());
        }
        Commands::Rename { list, title } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.update_list_title(&id, &title)?, "Renamed list");
        }
        Commands::Delete { list } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.delete_list(&id)?, "Deleted list");
        }
        Commands::Archive { list } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.archive_list(&id)?, "Archived list");
        }
        Commands::Restore { list } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.restore_list(&id)?, "Restored list");
        }
        Commands::Duplicate { list } => {
            let id = resolve_list(&store, &list)?.id.clone();
            let copy = store.duplicate_list(&id)?;
            println!("Created {} ({})", copy.title.bold(), copy.id.dimmed());
        }
        Commands::Add {
            list,
            name,
            quantity,
            category,
            price,
        } => {
            let id = resolve_list(&store, &list)?.id.clone();
            let item = store.add_item(&id, NewItem::new(name, quantity, category, price.unwrap_or(0.0)))?;
            println!("Added {} (#{})", item.name.bold(), item.order);
        }
        Commands::Edit {
            list,
            item,
            name,
            quantity,
            category,
            price,
        } => {
            let (list_id, item_id) = resolve_item(&store, &list, &item)?;
            let update = ItemUpdate {
                name,
                quantity,
                category,
                unit_price: price,
                ..ItemUpdate::default()
            };
            if update.is_empty() {
                return Err(eyre!("Nothing to change; pass at least one field"));
            }
            report(store.update_item(&list_id, &item_id, &update)?, "Updated item");
        }
        Commands::Remove { list, item } => {
            let (list_id, item_id) = resolve_item(&store, &list, &item)?;
            report(store.delete_item(&list_id, &item_id)?, "Removed item");
        }
        Commands::Toggle { list, item } => {
            let (list_id, item_id) = resolve_item(&store, &list, &item)?;
            report(store.toggle_item_bought(&list_id, &item_id)?, "Toggled item");
        }
        Commands::Move { list, item, position } => {
            let (list_id, item_id) = resolve_item(&store, &list, &item)?;
            let current = resolve_list(&store, &list_id)?;
            let items = move_item(current, &item_id, position.saturating_sub(1))
                .ok_or_else(|| eyre!("Item not found: {}", item))?;
            report(store.reorder_items(&list_id, items)?, "Moved item");
        }
        Commands::MarkAll { list, unbought } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.mark_all_bought(&id, !unbought)?, "Updated every item");
        }
        Commands::ClearBought { list } => {
            let id = resolve_list(&store, &list)?.id.clone();
            report(store.clear_bought_items(&id)?, "Cleared bought items");
        }
        Commands::Show {
            list,
            sort,
            direction,
            category,
            search,
            group,
        } => {
            let list = resolve_list(&store, &list)?;
            let settings = store.settings();
            let filter = ItemFilter { search, category };
            let field = sort.unwrap_or(settings.default_sort);
            let direction = direction.unwrap_or(settings.default_sort_direction);
            print_list_detail(list, &filter, field, direction, group);
        }
        Commands::Export { list } => {
            let list = resolve_list(&store, &list)?;
            println!("{}", list_to_text(list));
        }
        Commands::Settings {
            theme,
            sort,
            direction,
            toggle_theme,
        } => {
            let update = SettingsUpdate {
                theme,
                default_sort: sort,
                default_sort_direction: direction,
            };
            if toggle_theme {
                store.toggle_theme()?;
            }
            if update != SettingsUpdate::default() {
                store.update_settings(update)?;
            }
            let settings = store.settings();
            println!("theme:          {}", settings.theme);
            println!("sort:           {}", settings.default_sort);
            println!("direction:      {}", settings.default_sort_direction);
        }
        Commands::Suggest { query, limit } => {
            for name in suggest(&query, limit) {
                println!("{}", name);
            }
        }
        Commands::Swipe { list, item, dx, dy } => match item {
            Some(item) => {
                let (list_id, item_id) = resolve_item(&store, &list, &item)?;
                let mut row = SwipeRecognizer::new(item_row_bindings());
                match row.run(drag_script(dx, dy)) {
                    Some(action) => {
                        let label = match action {
                            ItemRowAction::Delete => "Swiped left: removed item",
                            ItemRowAction::ToggleBought => "Swiped right: toggled item",
                        };
                        report(apply_item_action(&mut store, &list_id, &item_id, action)?, label);
                    }
                    None => println!("{}", "No swipe".dimmed()),
                }
            }
            None => {
                let id = resolve_list(&store, &list)?.id.clone();
                let mut row = SwipeRecognizer::new(list_row_bindings());
                match row.run(drag_script(dx, dy)) {
                    Some(action) => {
                        match apply_list_action(&mut store, &id, action)? {
                            ListActionOutcome::Deleted(m) => report(m, "Swiped left: deleted list"),
                            ListActionOutcome::Duplicated(copy) => {
                                println!("Swiped right: created {} ({})", copy.title.bold(), copy.id.dimmed())
                            }
                        }
                    }
                    None => println!("{}", "No swipe".dimmed()),
                }
            }
        },
    }

    Ok(())
}

/// Shortest accepted list title or item name, after trimming
const MIN_NAME_CHARS: usize = 2;

/// Trimmed list title or item name of at least two characters
fn parse_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(eyre!("must be at least {} characters", MIN_NAME_CHARS));
    }
    Ok(name.to_string())
}

/// Finite quantity greater than zero
fn parse_quantity(raw: &str) -> Result<f64> {
    let quantity: f64 = raw.trim().parse().map_err(|_| eyre!("not a number: {}", raw))?;
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(eyre!("must be a finite number greater than 0"));
    }
    Ok(quantity)
}

/// Non-negative price in display form ("12,90", "R$ 1.234,56")
fn parse_price(raw: &str) -> Result<f64> {
    if raw.trim_start().starts_with('-') {
        return Err(eyre!("cannot be negative"));
    }
    Ok(parse_currency(raw))
}

/// Find a list by id, or by a unique case-insensitive title
fn resolve_list<'a>(store: &'a Store, key: &str) -> Result<&'a ShoppingList> {
    if let Some(list) = store.get_list(key) {
        return Ok(list);
    }
    let matches: Vec<&ShoppingList> = store
        .lists()
        .iter()
        .filter(|l| l.title.eq_ignore_ascii_case(key.trim()))
        .collect();
    match matches.as_slice() {
        [list] => Ok(*list),
        [] => Err(eyre!("List not found: {}", key)),
        _ => Err(eyre!("Several lists are titled {:?}; use the list id", key)),
    }
}

/// Find an item by id, or by a unique case-insensitive name, within a list
fn resolve_item(store: &Store, list_key: &str, item_key: &str) -> Result<(String, String)> {
    let list = resolve_list(store, list_key)?;
    let matches: Vec<&Item> = list
        .items
        .iter()
        .filter(|i| i.id == item_key || i.name.eq_ignore_ascii_case(item_key.trim()))
        .collect();
    match matches.as_slice() {
        [item] => Ok((list.id.clone(), item.id.clone())),
        [] => Err(eyre!("Item not found in {}: {}", list.title, item_key)),
        _ => Err(eyre!("Several items are named {:?}; use the item id", item_key)),
    }
}

fn report(mutation: Mutation, message: &str) {
    match mutation {
        Mutation::Applied => println!("{}", message.green()),
        Mutation::Unchanged => println!("{}", "Nothing changed".yellow()),
    }
}

fn print_list_summary(list: &ShoppingList) {
    let progress = list_progress(list);
    let total = list_total_value(list);
    println!(
        "{}  {}/{} items  {:>3.0}%  {}  {}",
        list.title.bold(),
        bought_count(list),
        list.items.len(),
        progress,
        format_currency(total),
        format_date(&list.created_at).dimmed(),
    );
    println!("  {}", list.id.dimmed());
}

fn print_list_detail(list: &ShoppingList, filter: &ItemFilter, field: SortField, direction: SortDirection, group: bool) {
    println!(
        "{}  {}/{} bought  {:.0}%",
        list.title.bold(),
        bought_count(list),
        list.items.len(),
        list_progress(list)
    );

    let chips: Vec<String> = category_counts(list)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| format!("{} ({})", category, count))
        .collect();
    if !chips.is_empty() {
        println!("{}", chips.join("  ").dimmed());
    }
    println!();

    let items = process_items(list, filter, field, direction);
    if items.is_empty() {
        let message = if filter.is_active() { "No items found" } else { "Empty list" };
        println!("{}", message.dimmed());
    } else if group {
        for group in group_by_category(items) {
            println!("{}", group.category.to_string().bold());
            for item in group.items {
                print_item(item);
            }
        }
    } else {
        for item in items {
            print_item(item);
        }
    }

    println!();
    println!("Total: {}", format_currency(list_total_value(list)).bold());
}

fn print_item(item: &Item) {
    let mark = if item.bought { "[x]".green() } else { "[ ]".normal() };
    let name = if item.bought {
        item.name.strikethrough().dimmed()
    } else {
        item.name.normal()
    };
    let line_total = item.quantity * item.unit_price;
    println!(
        "  {} {} × {}  {}  {}",
        mark,
        name,
        item.quantity,
        format_currency(line_total),
        item.category.to_string().dimmed()
    );
}
