// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Localized text catalogue.
//!
//! Templates use `{name}` placeholders filled by [`render`]. Every message has
//! an English, Ukrainian and Russian form.

use pantry_core::types::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Msg {
    // General
    Welcome,
    Help,
    Status,
    MyId,
    Unauthorized,
    MainMenu,
    MessageReceived,
    UnknownCommand,
    UnknownAction,
    Processing,
    VoiceTranscript,
    ChooseLanguage,
    LanguageChanged,

    // Errors
    SessionExpired,
    TransportError,
    ServiceUnavailable,
    EmptySpeech,
    InvalidInput,
    AccessDenied,
    NotFound,
    Conflict,
    InternalError,

    // Lists
    ListsOverview,
    NoLists,
    ChooseFamily,
    EnterListName,
    ListCreated,
    ListNameTooShort,
    ListNameTooLong,
    ListExists,
    NotFamilyMember,
    EmptyList,
    AddItemsPrompt,
    NoItemsParsed,
    CreateFamilyHint,
    ConfirmDeleteList,
    ListDeleted,
    NotListOwner,

    // Product lists
    ProductListDetected,
    LowConfidence,
    CustomListNamePrompt,
    EmptyName,
    AutoListName,

    // Duplicates
    DuplicatesFound,

    // Families
    FamilyCreated,
    FamilyUsage,
    FamiliesTitle,
    NoFamilies,
    AddMemberUsage,
    FamilyNotFound,
    FamilyAdminRequired,
    MemberNotFound,
    AlreadyMember,
    MemberAdded,
    AddedToFamily,

    // Admin
    UsersTitle,
    AdminStats,
    UserAuthorized,
    UserRevoked,
    AuthorizeUsage,
    UserNotFound,
    NewUserNotice,
    AuthorizationGranted,

    // Receipts
    ReceiptsMenu,
    ReceiptsDisabled,
    UploadPrompt,
    ReceiptProcessing,
    ReceiptSaved,
    ReceiptFailed,
    ReceiptHint,
    NoReceipts,
    ReceiptsPage,
    ReceiptSummary,

    // Buttons
    BtnLists,
    BtnCreateList,
    BtnFamilies,
    BtnReceipts,
    BtnLanguage,
    BtnHelp,
    BtnMainMenu,
    BtnAddItems,
    BtnClearCompleted,
    BtnDeleteList,
    BtnConfirmDelete,
    BtnViewList,
    BtnAllLists,
    BtnPersonal,
    BtnKeep,
    BtnReplace,
    BtnBoth,
    BtnKeepAll,
    BtnReplaceAll,
    BtnCancel,
    BtnCreateAuto,
    BtnCreateCustom,
    BtnUpload,
    BtnViewReceipts,
    BtnTaxes,
    BtnStats,
    BtnPrev,
    BtnNext,
    BtnBack,
}

fn forms(msg: Msg) -> [&'static str; 3] {
    use Msg::*;
    match msg {
        Welcome => [
            "👋 Welcome, {name}!\n\nSend me a shopping list as text or voice and I will sort it into your lists. Use the menu below to get started.",
            "👋 Вітаю, {name}!\n\nНадішліть список покупок текстом або голосом, і я розкладу його по ваших списках. Скористайтеся меню нижче.",
            "👋 Добро пожаловать, {name}!\n\nОтправьте список покупок текстом или голосом, и я разложу его по вашим спискам. Воспользуйтесь меню ниже.",
        ],
        Help => [
            "ℹ️ <b>Help</b>\n\n/lists – your shopping lists\n/createlist – create a list\n/createfamily &lt;name&gt; – create a family\n/addfamilymember &lt;family&gt; &lt;@user|id&gt; – add a family member\n/families – your families\n/receipts – receipts\n/status – your status\n/myid – your Telegram ID\n\nSend any message that looks like a shopping list and I will offer to add it. Items are matched by name only: \"milk\" and \"молоко\" are different items.",
            "ℹ️ <b>Довідка</b>\n\n/lists – ваші списки\n/createlist – створити список\n/createfamily &lt;назва&gt; – створити родину\n/addfamilymember &lt;родина&gt; &lt;@user|id&gt; – додати учасника родини\n/families – ваші родини\n/receipts – чеки\n/status – ваш статус\n/myid – ваш Telegram ID\n\nНадішліть повідомлення, схоже на список покупок, і я запропоную його додати. Товари порівнюються лише за назвою: \"milk\" і \"молоко\" – різні товари.",
            "ℹ️ <b>Справка</b>\n\n/lists – ваши списки\n/createlist – создать список\n/createfamily &lt;название&gt; – создать семью\n/addfamilymember &lt;семья&gt; &lt;@user|id&gt; – добавить участника семьи\n/families – ваши семьи\n/receipts – чеки\n/status – ваш статус\n/myid – ваш Telegram ID\n\nОтправьте сообщение, похожее на список покупок, и я предложу его добавить. Товары сравниваются только по названию: \"milk\" и \"молоко\" – разные товары.",
        ],
        Status => [
            "📊 <b>Status</b>\n\nAuthorized: {authorized}\nLanguage: {locale}\nLists: {lists}",
            "📊 <b>Статус</b>\n\nАвторизовано: {authorized}\nМова: {locale}\nСписків: {lists}",
            "📊 <b>Статус</b>\n\nАвторизован: {authorized}\nЯзык: {locale}\nСписков: {lists}",
        ],
        MyId => [
            "🆔 Your Telegram ID: <code>{id}</code>",
            "🆔 Ваш Telegram ID: <code>{id}</code>",
            "🆔 Ваш Telegram ID: <code>{id}</code>",
        ],
        Unauthorized => [
            "🔒 Access Denied\n\nHello {name}! You need to be authorized to use this bot.\nYour Telegram ID: {id}\n\nPlease contact an administrator to request access.\nAvailable commands: /start, /help, /status, /myid",
            "🔒 Доступ заборонено\n\nВітаю, {name}! Щоб користуватися ботом, потрібна авторизація.\nВаш Telegram ID: {id}\n\nЗверніться до адміністратора.\nДоступні команди: /start, /help, /status, /myid",
            "🔒 Доступ запрещён\n\nЗдравствуйте, {name}! Для работы с ботом нужна авторизация.\nВаш Telegram ID: {id}\n\nОбратитесь к администратору.\nДоступные команды: /start, /help, /status, /myid",
        ],
        MainMenu => [
            "🏠 <b>Main menu</b>",
            "🏠 <b>Головне меню</b>",
            "🏠 <b>Главное меню</b>",
        ],
        MessageReceived => [
            "✅ Message received! Use /lists to manage your shopping lists or /help to see available commands.",
            "✅ Повідомлення отримано! Використовуйте /lists для керування списками або /help для перегляду команд.",
            "✅ Сообщение получено! Используйте /lists для управления списками или /help для списка команд.",
        ],
        UnknownCommand => [
            "❓ Unknown command. Use /help to see what I can do.",
            "❓ Невідома команда. Скористайтеся /help.",
            "❓ Неизвестная команда. Воспользуйтесь /help.",
        ],
        UnknownAction => [
            "This button is no longer supported.",
            "Ця кнопка більше не підтримується.",
            "Эта кнопка больше не поддерживается.",
        ],
        Processing => [
            "🔄 Processing items...",
            "🔄 Обробляю товари...",
            "🔄 Обрабатываю товары...",
        ],
        VoiceTranscript => ["🎤 {text}", "🎤 {text}", "🎤 {text}"],
        ChooseLanguage => [
            "🌐 Choose your language:",
            "🌐 Оберіть мову:",
            "🌐 Выберите язык:",
        ],
        LanguageChanged => [
            "✅ Language set to English.",
            "✅ Мову змінено на українську.",
            "✅ Язык изменён на русский.",
        ],

        SessionExpired => [
            "⌛ This session has expired.",
            "⌛ Ця сесія вже завершилася.",
            "⌛ Эта сессия уже истекла.",
        ],
        TransportError => [
            "😔 Sorry, something went wrong while talking to the server. Please try again.",
            "😔 Вибачте, під час зв'язку із сервером сталася помилка. Спробуйте ще раз.",
            "😔 Извините, при связи с сервером произошла ошибка. Попробуйте ещё раз.",
        ],
        ServiceUnavailable => [
            "😔 The assistant is temporarily unavailable. Please try again in a moment.",
            "😔 Помічник тимчасово недоступний. Спробуйте трохи пізніше.",
            "😔 Помощник временно недоступен. Попробуйте чуть позже.",
        ],
        EmptySpeech => [
            "🎤 I could not hear any speech. Please try recording again.",
            "🎤 Не вдалося розпізнати мовлення. Спробуйте записати ще раз.",
            "🎤 Не удалось распознать речь. Попробуйте записать ещё раз.",
        ],
        InvalidInput => [
            "❌ Please provide some text.",
            "❌ Будь ласка, надішліть текст.",
            "❌ Пожалуйста, отправьте текст.",
        ],
        AccessDenied => [
            "❌ You don't have access to this list.",
            "❌ У вас немає доступу до цього списку.",
            "❌ У вас нет доступа к этому списку.",
        ],
        NotFound => [
            "❌ Not found. It may have been deleted.",
            "❌ Не знайдено. Можливо, його видалено.",
            "❌ Не найдено. Возможно, его удалили.",
        ],
        Conflict => [
            "❌ That already exists.",
            "❌ Таке вже існує.",
            "❌ Такое уже существует.",
        ],
        InternalError => [
            "❌ Something went wrong. Please start again with /start.",
            "❌ Щось пішло не так. Почніть знову з /start.",
            "❌ Что-то пошло не так. Начните заново с /start.",
        ],

        ListsOverview => [
            "📋 <b>Your shopping lists</b>",
            "📋 <b>Ваші списки покупок</b>",
            "📋 <b>Ваши списки покупок</b>",
        ],
        NoLists => [
            "📋 You have no shopping lists yet.",
            "📋 У вас ще немає списків покупок.",
            "📋 У вас пока нет списков покупок.",
        ],
        ChooseFamily => [
            "👨‍👩‍👧 Where should the new list live?",
            "👨‍👩‍👧 Де створити новий список?",
            "👨‍👩‍👧 Где создать новый список?",
        ],
        EnterListName => [
            "✏️ Send me a name for the new list.",
            "✏️ Надішліть назву нового списку.",
            "✏️ Отправьте название нового списка.",
        ],
        ListCreated => [
            "✅ List <b>{name}</b> created!",
            "✅ Список <b>{name}</b> створено!",
            "✅ Список <b>{name}</b> создан!",
        ],
        ListNameTooShort => [
            "❌ The name is too short: at least {min} characters.",
            "❌ Назва закоротка: щонайменше {min} символи.",
            "❌ Название слишком короткое: минимум {min} символа.",
        ],
        ListNameTooLong => [
            "❌ The name is too long: at most {max} characters.",
            "❌ Назва задовга: не більше {max} символів.",
            "❌ Название слишком длинное: не более {max} символов.",
        ],
        ListExists => [
            "❌ A list named <b>{name}</b> already exists. Try another name.",
            "❌ Список <b>{name}</b> вже існує. Спробуйте іншу назву.",
            "❌ Список <b>{name}</b> уже существует. Попробуйте другое название.",
        ],
        NotFamilyMember => [
            "❌ You are not a member of this family.",
            "❌ Ви не є членом цієї родини.",
            "❌ Вы не состоите в этой семье.",
        ],
        EmptyList => [
            "<i>The list is empty.</i>",
            "<i>Список порожній.</i>",
            "<i>Список пуст.</i>",
        ],
        AddItemsPrompt => [
            "➕ Send the items to add to <b>{name}</b>.",
            "➕ Надішліть товари для списку <b>{name}</b>.",
            "➕ Отправьте товары для списка <b>{name}</b>.",
        ],
        NoItemsParsed => [
            "🤷 I could not find any items in that message.",
            "🤷 Не вдалося знайти товари в цьому повідомленні.",
            "🤷 Не удалось найти товары в этом сообщении.",
        ],
        CreateFamilyHint => [
            "👨‍👩‍👧 Send /createfamily followed by a name, e.g. <code>/createfamily Home</code>.",
            "👨‍👩‍👧 Надішліть /createfamily і назву, наприклад <code>/createfamily Дім</code>.",
            "👨‍👩‍👧 Отправьте /createfamily и название, например <code>/createfamily Дом</code>.",
        ],
        ConfirmDeleteList => [
            "🗑 Delete <b>{name}</b> with all its items? This cannot be undone.",
            "🗑 Видалити <b>{name}</b> разом з усіма товарами? Це незворотно.",
            "🗑 Удалить <b>{name}</b> вместе со всеми товарами? Это необратимо.",
        ],
        ListDeleted => [
            "🗑 List «{name}» deleted.",
            "🗑 Список «{name}» видалено.",
            "🗑 Список «{name}» удалён.",
        ],
        NotListOwner => [
            "⛔ Only the person who created this list can delete it.",
            "⛔ Видалити список може лише той, хто його створив.",
            "⛔ Удалить список может только тот, кто его создал.",
        ],

        ProductListDetected => [
            "🛒 This looks like a shopping list ({count} items). Where should I add it?",
            "🛒 Схоже на список покупок ({count} товарів). Куди його додати?",
            "🛒 Похоже на список покупок ({count} товаров). Куда его добавить?",
        ],
        LowConfidence => [
            "🤔 I noticed you might be trying to add items to a shopping list, but I'm not sure. Use /lists to manage your shopping lists manually or try writing items more clearly.",
            "🤔 Схоже, ви хочете додати товари до списку, але я не впевнений. Скористайтеся /lists або напишіть товари чіткіше.",
            "🤔 Похоже, вы хотите добавить товары в список, но я не уверен. Воспользуйтесь /lists или напишите товары понятнее.",
        ],
        CustomListNamePrompt => [
            "✏️ Send a name for the new list.",
            "✏️ Надішліть назву для нового списку.",
            "✏️ Отправьте название для нового списка.",
        ],
        EmptyName => [
            "❌ The name cannot be empty.",
            "❌ Назва не може бути порожньою.",
            "❌ Название не может быть пустым.",
        ],
        AutoListName => ["Shopping {date}", "Покупки {date}", "Покупки {date}"],

        DuplicatesFound => [
            "🔍 <b>Duplicate items found!</b>\n\nThe following items are already in your list. Choose what to do:",
            "🔍 <b>Знайдено дублікати!</b>\n\nЦі товари вже є у списку. Оберіть, що зробити:",
            "🔍 <b>Найдены дубликаты!</b>\n\nЭти товары уже есть в списке. Выберите, что сделать:",
        ],

        FamilyCreated => [
            "✅ Family <b>{name}</b> created.",
            "✅ Родину <b>{name}</b> створено.",
            "✅ Семья <b>{name}</b> создана.",
        ],
        FamilyUsage => [
            "Usage: /createfamily &lt;name&gt;",
            "Використання: /createfamily &lt;назва&gt;",
            "Использование: /createfamily &lt;название&gt;",
        ],
        AddMemberUsage => [
            "Usage: /addfamilymember &lt;family&gt; &lt;@username or telegram_id&gt;",
            "Використання: /addfamilymember &lt;родина&gt; &lt;@username або telegram_id&gt;",
            "Использование: /addfamilymember &lt;семья&gt; &lt;@username или telegram_id&gt;",
        ],
        FamilyNotFound => [
            "❌ You have no family called <b>{name}</b>.",
            "❌ У вас немає родини <b>{name}</b>.",
            "❌ У вас нет семьи <b>{name}</b>.",
        ],
        FamilyAdminRequired => [
            "⛔ Only the creator of <b>{name}</b> can add members.",
            "⛔ Лише творець родини <b>{name}</b> може додавати учасників.",
            "⛔ Только создатель семьи <b>{name}</b> может добавлять участников.",
        ],
        MemberNotFound => [
            "❌ {who} has never talked to the bot.",
            "❌ {who} ще не писав боту.",
            "❌ {who} ещё не писал боту.",
        ],
        AlreadyMember => [
            "ℹ️ {member} is already in <b>{family}</b>.",
            "ℹ️ {member} вже в родині <b>{family}</b>.",
            "ℹ️ {member} уже в семье <b>{family}</b>.",
        ],
        MemberAdded => [
            "✅ {member} added to <b>{family}</b>.",
            "✅ {member} додано до родини <b>{family}</b>.",
            "✅ {member} добавлен в семью <b>{family}</b>.",
        ],
        AddedToFamily => [
            "👨‍👩‍👧 {admin} added you to the family <b>{family}</b>. Its lists now appear under /lists.",
            "👨‍👩‍👧 {admin} додав вас до родини <b>{family}</b>. Її списки тепер у /lists.",
            "👨‍👩‍👧 {admin} добавил вас в семью <b>{family}</b>. Её списки теперь в /lists.",
        ],
        FamiliesTitle => [
            "👨‍👩‍👧 <b>Your families</b>",
            "👨‍👩‍👧 <b>Ваші родини</b>",
            "👨‍👩‍👧 <b>Ваши семьи</b>",
        ],
        NoFamilies => [
            "👨‍👩‍👧 You are not in any family yet.",
            "👨‍👩‍👧 Ви ще не входите до жодної родини.",
            "👨‍👩‍👧 Вы пока не состоите ни в одной семье.",
        ],

        UsersTitle => [
            "👥 <b>Users</b>",
            "👥 <b>Користувачі</b>",
            "👥 <b>Пользователи</b>",
        ],
        AdminStats => [
            "📈 <b>Statistics</b>\n\nUsers: {users}\nAuthorized: {authorized}\nAdmins: {admins}\nFamilies: {families}",
            "📈 <b>Статистика</b>\n\nКористувачів: {users}\nАвторизованих: {authorized}\nАдміністраторів: {admins}\nРодин: {families}",
            "📈 <b>Статистика</b>\n\nПользователей: {users}\nАвторизованных: {authorized}\nАдминистраторов: {admins}\nСемей: {families}",
        ],
        UserAuthorized => [
            "✅ User {id} authorized.",
            "✅ Користувача {id} авторизовано.",
            "✅ Пользователь {id} авторизован.",
        ],
        UserRevoked => [
            "⛔ Access revoked for user {id}.",
            "⛔ Доступ користувача {id} скасовано.",
            "⛔ Доступ пользователя {id} отозван.",
        ],
        AuthorizeUsage => [
            "Usage: /authorize &lt;telegram_id&gt; or /revoke &lt;telegram_id&gt;",
            "Використання: /authorize &lt;telegram_id&gt; або /revoke &lt;telegram_id&gt;",
            "Использование: /authorize &lt;telegram_id&gt; или /revoke &lt;telegram_id&gt;",
        ],
        NewUserNotice => [
            "👤 New user: {name} (@{username}), ID <code>{id}</code>.\nAuthorize with /authorize {id}",
            "👤 Новий користувач: {name} (@{username}), ID <code>{id}</code>.\nАвторизуйте: /authorize {id}",
            "👤 Новый пользователь: {name} (@{username}), ID <code>{id}</code>.\nАвторизуйте: /authorize {id}",
        ],
        AuthorizationGranted => [
            "✅ {name}, you now have access. Send /start to begin.",
            "✅ {name}, доступ надано. Надішліть /start, щоб почати.",
            "✅ {name}, доступ открыт. Отправьте /start, чтобы начать.",
        ],
        UserNotFound => [
            "❌ User {id} has never talked to the bot.",
            "❌ Користувач {id} ще не писав боту.",
            "❌ Пользователь {id} ещё не писал боту.",
        ],

        ReceiptsMenu => [
            "🧾 <b>Receipts</b>\n\nUpload a photo or PDF of a receipt and I will extract its contents.",
            "🧾 <b>Чеки</b>\n\nЗавантажте фото або PDF чека, і я розпізнаю його вміст.",
            "🧾 <b>Чеки</b>\n\nЗагрузите фото или PDF чека, и я распознаю его содержимое.",
        ],
        ReceiptsDisabled => [
            "🧾 Receipt recognition is not configured.",
            "🧾 Розпізнавання чеків не налаштовано.",
            "🧾 Распознавание чеков не настроено.",
        ],
        UploadPrompt => [
            "📤 Send a photo or PDF of your receipt.",
            "📤 Надішліть фото або PDF чека.",
            "📤 Отправьте фото или PDF чека.",
        ],
        ReceiptProcessing => [
            "⏳ Processing the receipt, this can take up to a minute...",
            "⏳ Обробляю чек, це може тривати до хвилини...",
            "⏳ Обрабатываю чек, это может занять до минуты...",
        ],
        ReceiptSaved => [
            "✅ Receipt processed!\n\n🏪 {merchant}\n💰 Total: {total} {currency}\n🧮 Tax: {tax}\n📦 Items: {items}",
            "✅ Чек оброблено!\n\n🏪 {merchant}\n💰 Сума: {total} {currency}\n🧮 Податок: {tax}\n📦 Позицій: {items}",
            "✅ Чек обработан!\n\n🏪 {merchant}\n💰 Сумма: {total} {currency}\n🧮 Налог: {tax}\n📦 Позиций: {items}",
        ],
        ReceiptFailed => [
            "❌ I could not read this receipt. Please try a clearer photo.",
            "❌ Не вдалося прочитати чек. Спробуйте чіткіше фото.",
            "❌ Не удалось прочитать чек. Попробуйте более чёткое фото.",
        ],
        ReceiptHint => [
            "🧾 To upload a receipt, open /receipts and press Upload first.",
            "🧾 Щоб завантажити чек, відкрийте /receipts і натисніть «Завантажити».",
            "🧾 Чтобы загрузить чек, откройте /receipts и нажмите «Загрузить».",
        ],
        NoReceipts => [
            "🧾 You have no receipts yet.",
            "🧾 У вас ще немає чеків.",
            "🧾 У вас пока нет чеков.",
        ],
        ReceiptsPage => [
            "🧾 <b>Your receipts</b> (page {page} of {pages})",
            "🧾 <b>Ваші чеки</b> (сторінка {page} з {pages})",
            "🧾 <b>Ваши чеки</b> (страница {page} из {pages})",
        ],
        ReceiptSummary => [
            "📊 <b>Receipt totals</b>\n\nReceipts: {count} ({processed} processed)\nTotal spent: {spent}\nTotal tax: {tax}",
            "📊 <b>Підсумки чеків</b>\n\nЧеків: {count} (оброблено {processed})\nВитрачено: {spent}\nПодатків: {tax}",
            "📊 <b>Итоги по чекам</b>\n\nЧеков: {count} (обработано {processed})\nПотрачено: {spent}\nНалогов: {tax}",
        ],

        BtnLists => ["📋 My lists", "📋 Мої списки", "📋 Мои списки"],
        BtnCreateList => ["➕ New list", "➕ Новий список", "➕ Новый список"],
        BtnFamilies => ["👨‍👩‍👧 Families", "👨‍👩‍👧 Родини", "👨‍👩‍👧 Семьи"],
        BtnReceipts => ["🧾 Receipts", "🧾 Чеки", "🧾 Чеки"],
        BtnLanguage => ["🌐 Language", "🌐 Мова", "🌐 Язык"],
        BtnHelp => ["ℹ️ Help", "ℹ️ Довідка", "ℹ️ Справка"],
        BtnMainMenu => ["🏠 Main menu", "🏠 Головне меню", "🏠 Главное меню"],
        BtnClearCompleted => ["🧹 Clear bought", "🧹 Прибрати куплене", "🧹 Убрать купленное"],
        BtnDeleteList => ["🗑 Delete list", "🗑 Видалити список", "🗑 Удалить список"],
        BtnConfirmDelete => ["🗑 Yes, delete", "🗑 Так, видалити", "🗑 Да, удалить"],
        BtnAddItems => ["➕ Add items", "➕ Додати товари", "➕ Добавить товары"],
        BtnViewList => ["👀 View list", "👀 Переглянути", "👀 Открыть список"],
        BtnAllLists => ["📋 All lists", "📋 Усі списки", "📋 Все списки"],
        BtnPersonal => ["👤 Personal", "👤 Особистий", "👤 Личный"],
        BtnKeep => ["Keep", "Залишити", "Оставить"],
        BtnReplace => ["Replace", "Замінити", "Заменить"],
        BtnBoth => ["Add both", "Додати обидва", "Добавить оба"],
        BtnKeepAll => ["Keep all", "Залишити всі", "Оставить все"],
        BtnReplaceAll => ["Replace all", "Замінити всі", "Заменить все"],
        BtnCancel => ["❌ Cancel", "❌ Скасувати", "❌ Отмена"],
        BtnCreateAuto => ["🆕 New list", "🆕 Новий список", "🆕 Новый список"],
        BtnCreateCustom => ["✏️ Name a new list", "✏️ Назвати список", "✏️ Назвать список"],
        BtnUpload => ["📤 Upload", "📤 Завантажити", "📤 Загрузить"],
        BtnViewReceipts => ["🗂 My receipts", "🗂 Мої чеки", "🗂 Мои чеки"],
        BtnTaxes => ["🧮 Taxes", "🧮 Податки", "🧮 Налоги"],
        BtnStats => ["📊 Statistics", "📊 Статистика", "📊 Статистика"],
        BtnPrev => ["⬅️", "⬅️", "⬅️"],
        BtnNext => ["➡️", "➡️", "➡️"],
        BtnBack => ["🔙 Back", "🔙 Назад", "🔙 Назад"],
    }
}

/// The raw template for `msg`.
pub fn text(locale: Locale, msg: Msg) -> &'static str {
    let [en, uk, ru] = forms(msg);
    match locale {
        Locale::En => en,
        Locale::Uk => uk,
        Locale::Ru => ru,
    }
}

/// The template for `msg` with `{key}` placeholders replaced.
pub fn render(locale: Locale, msg: Msg, args: &[(&str, &str)]) -> String {
    let mut out = text(locale, msg).to_string();
    for (key, value) in args {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Escapes user-provided text for HTML parse mode.
pub fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_message_has_three_forms() {
        for msg in Msg::iter() {
            for locale in [Locale::En, Locale::Uk, Locale::Ru] {
                assert!(
                    !text(locale, msg).is_empty(),
                    "{} is empty for {locale}",
                    msg.as_ref()
                );
            }
        }
    }

    #[test]
    fn placeholders_match_across_locales() {
        fn placeholders(s: &str) -> Vec<&str> {
            let mut found: Vec<&str> = s
                .split('{')
                .skip(1)
                .filter_map(|part| part.split_once('}').map(|(key, _)| key))
                .collect();
            found.sort_unstable();
            found
        }
        for msg in Msg::iter() {
            let en = placeholders(text(Locale::En, msg));
            assert_eq!(en, placeholders(text(Locale::Uk, msg)), "{}", msg.as_ref());
            assert_eq!(en, placeholders(text(Locale::Ru, msg)), "{}", msg.as_ref());
        }
    }

    #[test]
    fn render_fills_placeholders() {
        let out = render(Locale::Uk, Msg::ListCreated, &[("name", "Тиждень")]);
        assert_eq!(out, "✅ Список <b>Тиждень</b> створено!");
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<b>&"), "&lt;b&gt;&amp;");
    }
}
