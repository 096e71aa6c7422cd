//! 规约：可组合的过滤谓词
//!
//! 过滤条件各自实现 `Specification`，再由 `all_of` 折叠为单个 AND 规约。
//!
pub trait Specification<T>: Send + Sync {
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// 将一组规约以 AND 折叠为一个；集合为空时返回 `None`（不施加任何约束）
pub fn all_of<T, I>(specs: I) -> Option<Box<dyn Specification<T>>>
where
    T: 'static,
    I: IntoIterator<Item = Box<dyn Specification<T>>>,
{
    specs
        .into_iter()
        .reduce(|acc, next| Box::new(AndSpecification::new(acc, next)))
}

/// 左右两侧都满足时才满足
pub struct AndSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> AndSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}
