use article_service::client::view::{Action, article_choices, form_draft, menu, require_text};
use article_service::client::{ArticleClient, Outcome, UiState, render};
use article_service::{ArticleRequest, ArticleResponse};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let client = ArticleClient::from_env();
    info!("Using article service at {}", client.base_url());

    let theme = ColorfulTheme::default();
    let mut state = UiState::default().apply(Outcome::Listed(client.list_articles().await));

    loop {
        println!("\n{}", render(&state));
        state = state.after_render();

        let actions = menu(&state);
        let Some(choice) = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        state = match actions[choice] {
            Action::Refresh => state.apply(Outcome::Listed(client.list_articles().await)),
            Action::Show => match pick_article(&theme, &state, "Read which article?")? {
                Some(id) => {
                    let shown = client.get_article(&id).await;
                    state.apply(Outcome::Shown(shown))
                }
                None => state,
            },
            Action::Publish => {
                let state = match read_form(&theme, None)? {
                    Some(draft) => state.apply(Outcome::Created(client.create_article(&draft).await)),
                    None => state.apply(Outcome::Incomplete),
                };
                state.apply(Outcome::Listed(client.list_articles().await))
            }
            Action::Edit => match pick_article(&theme, &state, "Edit which article?")? {
                Some(id) => {
                    let selected = client.get_article(&id).await;
                    state.apply(Outcome::Selected(selected))
                }
                None => state,
            },
            Action::Save => {
                let Some(editing) = state.editing.clone() else {
                    continue;
                };
                let state = match read_form(&theme, Some(&editing))? {
                    Some(draft) => {
                        let updated = client.update_article(&editing.id, &draft).await;
                        state.apply(Outcome::Updated(updated))
                    }
                    None => state.apply(Outcome::Incomplete),
                };
                state.apply(Outcome::Listed(client.list_articles().await))
            }
            Action::CancelEdit => state.apply(Outcome::EditCancelled),
            Action::Delete => match pick_article(&theme, &state, "Delete which article?")? {
                Some(id) => {
                    let result = client.delete_article(&id).await;
                    state
                        .apply(Outcome::Deleted { id, result })
                        .apply(Outcome::Listed(client.list_articles().await))
                }
                None => state,
            },
            Action::Quit => break,
        };
    }

    Ok(())
}

/// Lets the user choose a listed article; `None` when the list is empty or
/// the picker is dismissed.
fn pick_article(
    theme: &ColorfulTheme,
    state: &UiState,
    prompt: &str,
) -> Result<Option<String>, dialoguer::Error> {
    let choices = article_choices(state);
    if choices.is_empty() {
        return Ok(None);
    }

    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&choices)
        .default(0)
        .interact_opt()?;
    Ok(picked.and_then(|i| state.articles.get(i)).map(|a| a.id.clone()))
}

/// Prompts for title, author and content, prefilled from `current` when
/// editing. Blank answers are refused at the prompt.
fn read_form(
    theme: &ColorfulTheme,
    current: Option<&ArticleResponse>,
) -> Result<Option<ArticleRequest>, dialoguer::Error> {
    let mut values = Vec::with_capacity(3);
    for (label, existing) in [
        ("Title", current.map(|a| a.title.as_str())),
        ("Author", current.map(|a| a.author.as_str())),
        ("Content", current.map(|a| a.content.as_str())),
    ] {
        let mut input = Input::<String>::with_theme(theme)
            .with_prompt(label)
            .validate_with(|value: &String| require_text(value));
        if let Some(existing) = existing {
            input = input.with_initial_text(existing);
        }
        values.push(input.interact_text()?);
    }

    Ok(form_draft(&values[0], &values[1], &values[2]))
}
