// ============================================================================
// ROUTE TABLE - pages, paths, titles and auth flags
// ============================================================================

pub const HOME: &str = "Home";
pub const CATEGORY_LIST: &str = "CategoryList";
pub const CURTAIN_DETAIL: &str = "CurtainDetail";
pub const LOGIN: &str = "Login";
pub const ADMIN: &str = "Admin";
pub const CURTAIN_MANAGE: &str = "CurtainManage";

/// Page a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    CategoryList,
    CurtainDetail,
    Login,
    Admin,
    CurtainManage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub title: Option<&'static str>,
    pub requires_auth: bool,
}

/// One entry of the route tree; child paths are relative to the parent
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub page: Page,
    pub meta: RouteMeta,
    pub children: Vec<RouteDef>,
}

impl RouteDef {
    pub fn new(name: &'static str, path: &'static str, page: Page) -> Self {
        Self {
            name,
            path,
            page,
            meta: RouteMeta::default(),
            children: Vec::new(),
        }
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.meta.title = Some(title);
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn child(mut self, child: RouteDef) -> Self {
        self.children.push(child);
        self
    }
}

/// Public gallery plus the guarded admin area
pub fn catalog_routes() -> Vec<RouteDef> {
    vec![
        RouteDef::new(HOME, "/", Page::Home).title("首页 - 窗帘样本展示"),
        RouteDef::new(CATEGORY_LIST, "/category/:id", Page::CategoryList)
            .title("分类浏览 - 窗帘样本展示"),
        RouteDef::new(CURTAIN_DETAIL, "/curtain/:id", Page::CurtainDetail)
            .title("样本详情 - 窗帘样本展示"),
        RouteDef::new(LOGIN, "/admin/login", Page::Login).title("管理员登录"),
        RouteDef::new(ADMIN, "/admin", Page::Admin)
            .title("后台管理")
            .requires_auth()
            .child(
                RouteDef::new(CURTAIN_MANAGE, "curtains", Page::CurtainManage)
                    .title("窗帘样本管理")
                    .requires_auth(),
            ),
    ]
}
