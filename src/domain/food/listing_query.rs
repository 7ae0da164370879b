//! Food Context - 搜索 / 排序条件

/// 按过期时间排序的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// 解析 `sort` 查询参数
    ///
    /// `asc` 为升序，其他非空值一律降序；缺省或空串表示不排序（保持存储顺序）。
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        match param.map(str::trim) {
            None | Some("") => None,
            Some("asc") => Some(SortOrder::Ascending),
            Some(_) => Some(SortOrder::Descending),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// 名称过滤条件：大小写不敏感的字面子串匹配
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter(String);

impl NameFilter {
    pub fn new(term: Option<&str>) -> Self {
        Self(term.unwrap_or_default().to_lowercase())
    }

    /// 空过滤条件匹配所有名称
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 小写后的搜索词，与 `FoodName::folded` 比较
    pub fn folded_term(&self) -> &str {
        &self.0
    }
}

/// listing 搜索条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub name_filter: NameFilter,
    pub sort: Option<SortOrder>,
}

impl ListingQuery {
    pub fn from_params(search: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            name_filter: NameFilter::new(search),
            sort: SortOrder::from_param(sort),
        }
    }
}
