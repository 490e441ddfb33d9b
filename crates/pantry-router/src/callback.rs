// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback-token grammar.
//!
//! A token is a namespace followed by segments, separated by `:` when the
//! token contains one and by `_` otherwise. Tokens are always encoded with
//! `:`; the underscore form is accepted for buttons rendered by older
//! releases.
//!
//! ```text
//! menu:<action>
//! list:(view|additem):<listId>
//! li:t:<shortListId>:<shortItemId>
//! createlist:(<familyId>|personal)
//! show:(all|lists)
//! create:new:list
//! dup:(keep|replace|both):<index>[:<shortListId>]
//! dup:(keepall|replaceall|cancel)[:<shortListId>]
//! productlist:(addto:<shortListId>|create:auto[:…]|create:custom|cancel)
//! receipts:(menu|upload|view[:<page>]|detail:<receiptId>|taxes|stats)
//! lang:<code>
//! ```

use std::fmt;
use std::str::FromStr;

use pantry_core::types::Locale;
use pantry_state::payload::{decode_family_target, encode_family_target};
use strum::{Display, EnumString};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("empty callback token")]
    Empty,
    #[error("unknown callback namespace `{0}`")]
    UnknownNamespace(String),
    #[error("malformed `{namespace}` callback: {token}")]
    Malformed {
        namespace: &'static str,
        token: String,
    },
}

/// Main-menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MenuAction {
    Start,
    Help,
    Status,
    MyId,
    Lists,
    CreateList,
    CreateFamily,
    Families,
    Receipts,
    Language,
    Users,
    Stats,
}

/// Duplicate-resolution choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DupAction {
    Keep,
    Replace,
    Both,
    KeepAll,
    ReplaceAll,
    Cancel,
}

impl DupAction {
    /// True for actions that apply to a single pair and carry its index.
    pub fn is_per_item(self) -> bool {
        matches!(self, DupAction::Keep | DupAction::Replace | DupAction::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductListAction {
    AddTo(String),
    CreateAuto,
    CreateCustom,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptsAction {
    Menu,
    Upload,
    View { page: usize },
    Detail(Uuid),
    Taxes,
    Stats,
}

/// A parsed inline-keyboard callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Menu(MenuAction),
    ViewList(Uuid),
    AddItem(Uuid),
    /// Removes bought items from a list.
    ClearCompleted(Uuid),
    /// Asks before deleting; `ConfirmDeleteList` does it.
    DeleteList(Uuid),
    ConfirmDeleteList(Uuid),
    ToggleItem { list: String, item: String },
    /// `None` targets a personal list.
    CreateListFor(Option<Uuid>),
    ShowLists,
    CreateNewList,
    Duplicate {
        action: DupAction,
        index: Option<usize>,
        list: Option<String>,
    },
    ProductList(ProductListAction),
    Receipts(ReceiptsAction),
    Language(Locale),
}

impl Callback {
    /// Namespace label used in logs.
    pub fn namespace(&self) -> &'static str {
        match self {
            Callback::Menu(_) => "menu",
            Callback::ViewList(_)
            | Callback::AddItem(_)
            | Callback::ClearCompleted(_)
            | Callback::DeleteList(_)
            | Callback::ConfirmDeleteList(_) => "list",
            Callback::ToggleItem { .. } => "li",
            Callback::CreateListFor(_) => "createlist",
            Callback::ShowLists => "show",
            Callback::CreateNewList => "create",
            Callback::Duplicate { .. } => "dup",
            Callback::ProductList(_) => "productlist",
            Callback::Receipts(_) => "receipts",
            Callback::Language(_) => "lang",
        }
    }

    /// Canonical `:`-separated token.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Menu(action) => write!(f, "menu:{action}"),
            Callback::ViewList(id) => write!(f, "list:view:{id}"),
            Callback::AddItem(id) => write!(f, "list:additem:{id}"),
            Callback::ClearCompleted(id) => write!(f, "list:clear:{id}"),
            Callback::DeleteList(id) => write!(f, "list:delete:{id}"),
            Callback::ConfirmDeleteList(id) => write!(f, "list:confirmdelete:{id}"),
            Callback::ToggleItem { list, item } => write!(f, "li:t:{list}:{item}"),
            Callback::CreateListFor(family) => {
                write!(f, "createlist:{}", encode_family_target(*family))
            }
            Callback::ShowLists => write!(f, "show:lists"),
            Callback::CreateNewList => write!(f, "create:new:list"),
            Callback::Duplicate {
                action,
                index,
                list,
            } => {
                write!(f, "dup:{action}")?;
                if let Some(index) = index {
                    write!(f, ":{index}")?;
                }
                if let Some(list) = list {
                    write!(f, ":{list}")?;
                }
                Ok(())
            }
            Callback::ProductList(action) => match action {
                ProductListAction::AddTo(short) => write!(f, "productlist:addto:{short}"),
                ProductListAction::CreateAuto => write!(f, "productlist:create:auto"),
                ProductListAction::CreateCustom => write!(f, "productlist:create:custom"),
                ProductListAction::Cancel => write!(f, "productlist:cancel"),
            },
            Callback::Receipts(action) => match action {
                ReceiptsAction::Menu => write!(f, "receipts:menu"),
                ReceiptsAction::Upload => write!(f, "receipts:upload"),
                ReceiptsAction::View { page } => write!(f, "receipts:view:{page}"),
                ReceiptsAction::Detail(id) => write!(f, "receipts:detail:{id}"),
                ReceiptsAction::Taxes => write!(f, "receipts:taxes"),
                ReceiptsAction::Stats => write!(f, "receipts:stats"),
            },
            Callback::Language(locale) => write!(f, "lang:{}", locale.code()),
        }
    }
}

impl FromStr for Callback {
    type Err = TokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }
        let sep = if token.contains(':') { ':' } else { '_' };
        let parts: Vec<&str> = token.split(sep).collect();

        let namespace = parts[0];
        let rest = &parts[1..];
        match namespace {
            "menu" => parse_menu(token, rest),
            "list" => parse_list(token, rest),
            "li" => match rest {
                ["t", list, item] if !list.is_empty() && !item.is_empty() => {
                    Ok(Callback::ToggleItem {
                        list: (*list).to_string(),
                        item: (*item).to_string(),
                    })
                }
                _ => Err(malformed("li", token)),
            },
            "createlist" => match rest {
                [target] => decode_family_target(target)
                    .map(Callback::CreateListFor)
                    .map_err(|_| malformed("createlist", token)),
                _ => Err(malformed("createlist", token)),
            },
            "show" => match rest.first() {
                Some(&"all") | Some(&"lists") => Ok(Callback::ShowLists),
                _ => Err(malformed("show", token)),
            },
            "create" => match rest {
                ["new", "list"] => Ok(Callback::CreateNewList),
                _ => Err(malformed("create", token)),
            },
            "dup" => parse_dup(token, rest),
            "productlist" => parse_product_list(token, rest),
            "receipts" => parse_receipts(token, rest),
            "lang" => match rest {
                [code] if !code.is_empty() => Ok(Callback::Language(Locale::coerce(code))),
                _ => Err(malformed("lang", token)),
            },
            other => Err(TokenError::UnknownNamespace(other.to_string())),
        }
    }
}

fn malformed(namespace: &'static str, token: &str) -> TokenError {
    TokenError::Malformed {
        namespace,
        token: token.to_string(),
    }
}

fn parse_menu(token: &str, rest: &[&str]) -> Result<Callback, TokenError> {
    match rest {
        [action] => action
            .parse::<MenuAction>()
            .map(Callback::Menu)
            .map_err(|_| malformed("menu", token)),
        _ => Err(malformed("menu", token)),
    }
}

fn parse_list(token: &str, rest: &[&str]) -> Result<Callback, TokenError> {
    let (op, id) = match rest {
        [op, id] => (*op, *id),
        _ => return Err(malformed("list", token)),
    };
    let id = Uuid::parse_str(id).map_err(|_| malformed("list", token))?;
    match op {
        "view" => Ok(Callback::ViewList(id)),
        "additem" => Ok(Callback::AddItem(id)),
        "clear" => Ok(Callback::ClearCompleted(id)),
        "delete" => Ok(Callback::DeleteList(id)),
        "confirmdelete" => Ok(Callback::ConfirmDeleteList(id)),
        _ => Err(malformed("list", token)),
    }
}

fn parse_dup(token: &str, rest: &[&str]) -> Result<Callback, TokenError> {
    let (action, args) = rest.split_first().ok_or_else(|| malformed("dup", token))?;
    let action: DupAction = action.parse().map_err(|_| malformed("dup", token))?;

    let (index, list) = if action.is_per_item() {
        let (index, tail) = args.split_first().ok_or_else(|| malformed("dup", token))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| malformed("dup", token))?;
        (Some(index), tail)
    } else {
        (None, args)
    };
    let list = match list {
        [] => None,
        [short] if !short.is_empty() => Some((*short).to_string()),
        _ => return Err(malformed("dup", token)),
    };
    Ok(Callback::Duplicate {
        action,
        index,
        list,
    })
}

fn parse_product_list(token: &str, rest: &[&str]) -> Result<Callback, TokenError> {
    let action = match rest {
        ["addto", short] if !short.is_empty() => ProductListAction::AddTo((*short).to_string()),
        // Older buttons append the creation date after `auto`.
        ["create", "auto", ..] => ProductListAction::CreateAuto,
        ["create", "custom"] => ProductListAction::CreateCustom,
        ["cancel"] => ProductListAction::Cancel,
        _ => return Err(malformed("productlist", token)),
    };
    Ok(Callback::ProductList(action))
}

fn parse_receipts(token: &str, rest: &[&str]) -> Result<Callback, TokenError> {
    let action = match rest {
        ["menu"] => ReceiptsAction::Menu,
        ["upload"] => ReceiptsAction::Upload,
        ["view"] => ReceiptsAction::View { page: 0 },
        ["view", page] => ReceiptsAction::View {
            page: page.parse().map_err(|_| malformed("receipts", token))?,
        },
        ["detail", id] => ReceiptsAction::Detail(
            Uuid::parse_str(id).map_err(|_| malformed("receipts", token))?,
        ),
        ["taxes"] => ReceiptsAction::Taxes,
        ["stats"] => ReceiptsAction::Stats,
        _ => return Err(malformed("receipts", token)),
    };
    Ok(Callback::Receipts(action))
}
