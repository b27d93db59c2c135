//! Command handlers. Every handler runs inside the session scope set up by
//! `AuthProvider::mount`, so `use_auth()` is always available here.

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};

use recipebook_core::models::{Recipe, RecipeDetails};
use recipebook_core::utils::{format_optional, truncate_string};
use recipebook_core::views::{
    filter_recipes, nav_items, seasons_page, NavItem, RecipeCard, SeasonsPage, LOGIN_PROMPT,
};
use recipebook_core::auth::TokenStore;
use recipebook_core::{use_auth, ApiClient, AuthError, Config};

use crate::prompt;
use crate::Command;

/// Width of the description column in list output
const LIST_DESCRIPTION_WIDTH: usize = 60;

pub async fn run(
    command: Command,
    api: &ApiClient,
    store: &dyn TokenStore,
    config: &mut Config,
) -> Result<()> {
    match command {
        Command::Login { email } => login(email, config).await,
        Command::Register { username, email } => register(username, email, config).await,
        Command::Logout => logout(api).await,
        Command::Whoami => {
            whoami(api, store);
            Ok(())
        }
        Command::Nav => {
            nav();
            Ok(())
        }
        Command::Recipes { search } => recipes(api, search).await,
        Command::Recipe { id } => recipe(api, id).await,
        Command::Seasons => {
            seasons(api).await;
            Ok(())
        }
        Command::Season { id, filter } => season(api, id, filter).await,
        Command::Celebrations => celebrations(api).await,
        Command::Ethnicities => ethnicities(api).await,
    }
}

/// Turn a failed submission into the error the user sees.
fn submission_failed(err: AuthError) -> anyhow::Error {
    warn!(error = ?err, "Submission failed");
    anyhow!(err.user_message())
}

/// A client carrying the session token, or an error asking the user to log in.
fn authorized(api: &ApiClient) -> Result<ApiClient> {
    let auth = use_auth();
    match auth.token().filter(|_| auth.is_authenticated()) {
        Some(token) => Ok(api.with_token(token)),
        None => bail!("Not logged in. Run `recipebook login` first."),
    }
}

fn remember_email(config: &mut Config, email: &str) {
    if config.last_email.as_deref() == Some(email) {
        return;
    }
    config.last_email = Some(email.to_string());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }
}

async fn login(email: Option<String>, config: &mut Config) -> Result<()> {
    let email = prompt::field_with_default("Email", email, config.last_email.as_deref())?;
    let password = prompt::password()?;

    let auth = use_auth();
    auth.login(&email, &password).await.map_err(submission_failed)?;
    remember_email(config, &email);

    if let Some(user) = auth.user() {
        info!(user_id = user.id, "Logged in");
        println!("Logged in as {}.", user.username);
    }
    Ok(())
}

async fn register(username: Option<String>, email: Option<String>, config: &mut Config) -> Result<()> {
    let username = prompt::field("Username", username)?;
    let email = prompt::field("Email", email)?;
    let password = prompt::password()?;

    let auth = use_auth();
    auth.register(&username, &email, &password)
        .await
        .map_err(submission_failed)?;
    remember_email(config, &email);

    println!("Account created. Logged in as {}.", username);
    Ok(())
}

async fn logout(api: &ApiClient) -> Result<()> {
    let auth = use_auth();

    // Server-side revocation is best effort; the local session goes regardless
    if let Some(token) = auth.token() {
        if let Err(e) = api.revoke(&token).await {
            warn!(error = %e, "Failed to revoke token on server");
        }
    }
    auth.logout();

    println!("Logged out.");
    Ok(())
}

fn whoami(api: &ApiClient, store: &dyn TokenStore) {
    let auth = use_auth();
    match auth.user() {
        Some(user) => {
            println!("{} <{}>", user.username, user.email);
            println!("Server: {}", api.base_url());
            println!("Role: {}", format_optional(Some(user.role.as_str()), "user"));
            if auth.is_admin() {
                println!("Administrator access");
            }
            if !user.recipes.is_empty() {
                println!("Recipes submitted: {}", user.recipes.len());
            }
            match store.saved_at() {
                Ok(Some(saved_at)) => println!("Logged in since: {}", saved_at.format("%Y-%m-%d %H:%M UTC")),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Failed to read token timestamp"),
            }
        }
        None => println!("Not logged in."),
    }
}

fn nav() {
    for item in nav_items(&use_auth().state()) {
        match item {
            NavItem::Link { label, route } => println!("{:<14} {}", label, route),
            NavItem::Logout => println!("{:<14} (recipebook logout)", item.label()),
        }
    }
}

fn print_cards<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) {
    let mut shown = 0;
    for recipe in recipes {
        let card = RecipeCard::from(recipe);
        println!("{}  {}", card.href(), card.title);
        if !card.description.is_empty() {
            println!("    {}", truncate_string(&card.description, LIST_DESCRIPTION_WIDTH));
        }
        println!("    {} | {}", card.difficulty_line(), card.cooking_time_line());
        shown += 1;
    }
    if shown == 0 {
        println!("No recipes found.");
    }
}

async fn recipes(api: &ApiClient, search: Option<String>) -> Result<()> {
    let client = authorized(api)?;
    let recipes = match search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(keyword) => client.search_recipes(keyword).await?,
        None => client.fetch_recipes().await?,
    };
    print_cards(&recipes);
    Ok(())
}

fn print_details(details: &RecipeDetails) {
    let recipe = &details.recipe;
    println!("{}", recipe.name);
    if let Some(description) = &recipe.description {
        println!("{}", description);
    }
    println!();
    println!("Difficulty:   {}", format_optional(recipe.difficulty.as_deref(), "Unknown"));
    println!("Cooking time: {}", format_optional(recipe.cooking_time.as_deref(), "Unknown"));
    println!("Category:     {}", format_optional(recipe.category.as_deref(), "-"));

    if !details.ingredients.is_empty() {
        println!("\nIngredients");
        for ingredient in &details.ingredients {
            println!("  - {}", ingredient.display());
        }
    }

    if !details.steps.is_empty() {
        println!("\nSteps");
        for step in details.ordered_steps() {
            println!("  {}. {}", step.order, step.content);
        }
    }

    if !details.tips.is_empty() {
        println!("\nTips");
        for tip in &details.tips {
            println!("  * {}", tip.content);
        }
    }

    let groups: Vec<&str> = details
        .seasons
        .iter()
        .map(|s| s.name.as_str())
        .chain(details.celebrations.iter().map(|c| c.name.as_str()))
        .chain(details.ethnicities.iter().map(|e| e.name.as_str()))
        .collect();
    if !groups.is_empty() {
        println!("\nTags: {}", groups.join(", "));
    }
}

async fn recipe(api: &ApiClient, id: i64) -> Result<()> {
    let details = authorized(api)?.fetch_recipe_details(id).await?;
    print_details(&details);
    Ok(())
}

async fn seasons(api: &ApiClient) {
    match seasons_page(api).await {
        SeasonsPage::LoginRequired => println!("{}", LOGIN_PROMPT),
        SeasonsPage::Loaded(cards) if cards.is_empty() => println!("No seasons found."),
        SeasonsPage::Loaded(cards) => {
            for card in cards {
                println!("{}  {}", card.route, card.name);
                if !card.description.is_empty() {
                    println!("    {}", truncate_string(&card.description, LIST_DESCRIPTION_WIDTH));
                }
            }
        }
    }
}

async fn season(api: &ApiClient, id: i64, filter: Option<String>) -> Result<()> {
    let client = authorized(api)?;
    let season = client.fetch_season(id).await?;
    let recipes = client.fetch_season_recipes(id).await?;

    println!("{} recipes", season.name);
    println!();
    print_cards(filter_recipes(&recipes, filter.as_deref().unwrap_or("")));
    Ok(())
}

fn print_groups<'a>(groups: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) {
    for (name, description) in groups {
        match description {
            Some(d) if !d.is_empty() => {
                println!("{}  {}", name, truncate_string(d, LIST_DESCRIPTION_WIDTH))
            }
            _ => println!("{}", name),
        }
    }
}

async fn celebrations(api: &ApiClient) -> Result<()> {
    let celebrations = authorized(api)?.fetch_celebrations().await?;
    print_groups(
        celebrations
            .iter()
            .map(|c| (c.name.as_str(), c.description.as_deref())),
    );
    Ok(())
}

async fn ethnicities(api: &ApiClient) -> Result<()> {
    let ethnicities = authorized(api)?.fetch_ethnicities().await?;
    print_groups(
        ethnicities
            .iter()
            .map(|e| (e.name.as_str(), e.description.as_deref())),
    );
    Ok(())
}
