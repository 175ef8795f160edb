//! # Gazette
//!
//! A terminal news reader over a NewsAPI-compatible `/v2` service.
//!
//! ## Architecture
//!
//! ```text
//! API Client → List Controller → TUI
//! ```
//!
//! - [`api`]: the two remote read operations (top headlines, search) behind
//!   a uniform response shape and uniform error normalization
//! - [`list`]: the pagination/search state machine that owns filter state
//!   and derives the loading/error/empty/populated view states
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Print today's top headlines
//! gazette headlines
//!
//! # Search everything
//! gazette search "rust 1.0"
//!
//! # Launch the TUI (also the default with no subcommand)
//! gazette tui
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the loaded configuration to a
/// shared API client.
pub mod app;

/// The news provider client.
///
/// - [`NewsApi`](api::NewsApi): async trait over the two read operations
/// - [`NewsClient`](api::NewsClient): reqwest-based implementation
pub mod api;

/// Command-line interface using clap.
///
/// - `headlines [--category] [--country] [--page]` - print top headlines
/// - `search <query> [--page]` - print search results
/// - `tui` - launch the TUI (default)
pub mod cli;

/// Configuration management.
///
/// Loads `~/.config/gazette/config.toml` (API key, base URL, country,
/// page size), creating a commented default on first run.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): one article as the provider reports it
/// - [`ArticlePage`](domain::ArticlePage): one page of a list response
/// - [`Category`](domain::Category): closed headline category enum
pub mod domain;

/// The pagination/search state machine behind the article list.
///
/// - [`ListController`](list::ListController): owns filter/query state,
///   decides replace vs append, gates load-more, guards against stale
///   responses with fetch generations
pub mod list;

/// Terminal user interface.
///
/// List screen (search/filter bar, article rows, footer spinner) and a
/// detail screen rendered from the selected article without a re-fetch.
/// Keybindings: j/k navigate, / search, h/l category, Enter detail,
/// o opens in browser, R refreshes, q quits.
pub mod tui;
